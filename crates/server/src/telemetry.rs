use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use std::{
    future::Future,
    pin::Pin,
    sync::OnceLock,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};

use crate::auth::jwt::Claims;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Keep the LoggerProvider alive for the process lifetime.
static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

fn tls_config() -> opentelemetry_otlp::tonic_types::transport::ClientTlsConfig {
    opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots()
}

/// gRPC metadata carrying `SIGNOZ_INGESTION_KEY`, when set.
fn ingestion_metadata() -> Result<Option<opentelemetry_otlp::tonic_types::metadata::MetadataMap>, String> {
    let Some(key) = std::env::var("SIGNOZ_INGESTION_KEY").ok().filter(|k| !k.is_empty()) else {
        return Ok(None);
    };
    let mut metadata = opentelemetry_otlp::tonic_types::metadata::MetadataMap::new();
    let value = key
        .parse()
        .map_err(|_| "Invalid SIGNOZ_INGESTION_KEY value".to_string())?;
    metadata.insert("signoz-ingestion-key", value);
    Ok(Some(metadata))
}

/// Configure OTLP trace and log export and register the tracer provider
/// globally. Must run inside a Tokio runtime.
///
/// Reads config from environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address (required)
///   - `OTEL_SERVICE_NAME`: service name tag (default `innovex-arena`)
///   - `SIGNOZ_INGESTION_KEY`: cloud access token (optional)
///   - `DEPLOY_ENV`: deployment environment tag (default `development`)
pub fn init_telemetry() -> Result<(), String> {
    let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        tracing::warn!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
        return Ok(());
    };

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "innovex-arena".to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());
    let metadata = ingestion_metadata()?;
    let secure = endpoint.starts_with("https://");

    let mut builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint);
    if secure {
        builder = builder.with_tls_config(tls_config());
    }
    if let Some(md) = metadata.clone() {
        builder = builder.with_metadata(md);
    }
    let exporter = builder
        .build()
        .map_err(|e| format!("Failed to create OTLP span exporter: {e}"))?;

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(provider);

    let mut log_builder = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint);
    if secure {
        log_builder = log_builder.with_tls_config(tls_config());
    }
    if let Some(md) = metadata {
        log_builder = log_builder.with_metadata(md);
    }
    let log_exporter = log_builder
        .build()
        .map_err(|e| format!("Failed to create OTLP log exporter: {e}"))?;

    let logger_provider = LOGGER_PROVIDER.get_or_init(|| {
        opentelemetry_sdk::logs::SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build()
    });

    // Bridge the `log` crate to OpenTelemetry. Skipped when another logger
    // already owns the `log` facade.
    let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(logger_provider);
    match log::set_boxed_logger(Box::new(bridge)) {
        Ok(()) => log::set_max_level(log::LevelFilter::Info),
        Err(_) => tracing::info!("log bridge skipped, log facade already set"),
    }

    tracing::info!(%endpoint, version = APP_VERSION, "telemetry initialized");
    Ok(())
}

/// Span name for a request path: id-like segments become `{id}` so spans
/// for different records group under one route.
fn route_template(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            let is_uuid = segment.len() == 36 && segment.chars().filter(|c| *c == '-').count() == 4;
            let is_number = !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit());
            if is_uuid || is_number {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Tower layer that creates an OpenTelemetry span for each HTTP request.
///
/// Captures: method, route, client address, request ID, response status,
/// and the signed-in user (if any).
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer("innovex-arena");
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string()
        };
        let request_id = header("x-request-id");
        let forwarded_for = header("x-forwarded-for");
        let user_agent = header("user-agent");

        let auth_attrs: Vec<KeyValue> = match req.extensions().get::<Claims>() {
            Some(claims) => vec![
                KeyValue::new("user.id", claims.sub.to_string()),
                KeyValue::new("user.email", claims.email.clone()),
                KeyValue::new("auth.status", "authenticated"),
            ],
            None => vec![KeyValue::new("auth.status", "anonymous")],
        };

        let route = route_template(&path);
        let mut attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path),
            KeyValue::new("http.route", route.clone()),
            KeyValue::new("http.user_agent", user_agent),
            KeyValue::new("http.request_id", request_id),
            KeyValue::new("client.forwarded_for", forwarded_for),
        ];
        attributes.extend(auth_attrs);

        let span = tracer
            .span_builder(format!("{method} {route}"))
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));

            if status.is_server_error() {
                span.set_status(opentelemetry::trace::Status::error(status.to_string()));
            } else if status.is_client_error() {
                span.set_attribute(KeyValue::new("error.type", "client_error"));
            }

            Ok(response)
        })
    }
}
