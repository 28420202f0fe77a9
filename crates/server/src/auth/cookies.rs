use axum::http::{header, HeaderMap, HeaderValue};
use cookie::Cookie;
use shared_types::AppError;

use crate::config::Settings;

pub const SESSION_COOKIE: &str = "innovex_session";

fn to_header(cookie: Cookie<'_>) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&cookie.to_string())
        .map_err(|_| AppError::internal("Could not build session cookie"))
}

/// Build a Set-Cookie header value carrying the session token.
pub fn build_session_cookie(settings: &Settings, token: &str) -> Result<HeaderValue, AppError> {
    let mut cookie = Cookie::build((SESSION_COOKIE, token.to_string()))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::hours(settings.session_ttl_hours))
        .secure(settings.cookie_secure);

    if let Some(domain) = settings.cookie_domain.clone() {
        cookie = cookie.domain(domain);
    }

    to_header(cookie.build())
}

/// Build a Set-Cookie header that clears the session cookie.
pub fn build_clear_cookie(settings: &Settings) -> Result<HeaderValue, AppError> {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::ZERO)
        .secure(settings.cookie_secure);

    if let Some(domain) = settings.cookie_domain.clone() {
        cookie = cookie.domain(domain);
    }

    to_header(cookie.build())
}

/// Extract the session token from the cookie (preferred) or Bearer header.
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, SESSION_COOKIE).filter(|t| !t.is_empty()) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Parse a specific cookie value from the Cookie header.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        if let Ok(cookie_str) = header_value.to_str() {
            for piece in cookie_str.split(';') {
                if let Ok(c) = Cookie::parse(piece.trim().to_string()) {
                    if c.name() == name {
                        return Some(c.value().to_string());
                    }
                }
            }
        }
    }
    None
}
