//! Session credential extraction.

use axum::http::{header::COOKIE, HeaderMap};

/// Reads the cookie `name` from the request headers.
///
/// Every `Cookie` header is scanned; the first non-empty value wins.
pub fn session_token(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.trim_matches('"').to_string())
}
