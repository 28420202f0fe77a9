use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Sliding window rate limit state shared across requests.
#[derive(Clone)]
pub struct RateLimitState {
    inner: Arc<Mutex<RateLimitInner>>,
}

struct RateLimitInner {
    /// Map from client key -> list of request timestamps.
    requests: HashMap<String, Vec<Instant>>,
    max_requests: u32,
    window: Duration,
    message: &'static str,
}

const SUBMISSION_MESSAGE: &str = "Too many submissions. Please try again later.";
const SIGN_IN_MESSAGE: &str = "Too many sign-in attempts. Please try again later.";

impl RateLimitState {
    /// Create rate limiter allowing `max_requests` per `window`.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self::with_message(max_requests, window, SUBMISSION_MESSAGE)
    }

    fn with_message(max_requests: u32, window: Duration, message: &'static str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RateLimitInner {
                requests: HashMap::new(),
                max_requests,
                window,
                message,
            })),
        }
    }

    /// Same budget, separate buckets, for register and login.
    pub fn for_sign_in(&self) -> Self {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Self::with_message(inner.max_requests, inner.window, SIGN_IN_MESSAGE)
    }

    fn message(&self) -> &'static str {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).message
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).requests.len()
    }

    /// Record a request from `key`. Returns false once the window is full.
    fn check(&self, key: &str) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let window = inner.window;
        let max = inner.max_requests;

        // Keys come from request headers; drop clients whose window is empty.
        inner.requests.retain(|_, timestamps| {
            timestamps.retain(|t| now.duration_since(*t) < window);
            !timestamps.is_empty()
        });

        let timestamps = inner.requests.entry(key.to_string()).or_default();

        if timestamps.len() as u32 >= max {
            return false;
        }

        timestamps.push(now);
        true
    }
}

/// Client key: first hop of `X-Forwarded-For`, then `X-Real-IP`, else a
/// shared "anonymous" bucket.
fn client_key(headers: &HeaderMap) -> String {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let real_ip = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    forwarded
        .or(real_ip)
        .unwrap_or("anonymous")
        .to_string()
}

/// Axum middleware that limits anonymous submissions per client.
pub async fn rate_limit_middleware(
    State(state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(request.headers());

    if !state.check(&key) {
        tracing::warn!(client = %key, path = %request.uri().path(), "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "kind": "RateLimited",
                "message": state.message()
            })),
        )
            .into_response();
    }

    next.run(request).await
}
