//! Web utility functions

use axum::http::{HeaderMap, Method, Uri, header::CONTENT_TYPE};
use tracing::debug;

use super::extractors::RequestContext;

/// Log an incoming HTTP request at handler level
pub fn log_request(method: &Method, uri: &Uri, context: &RequestContext) {
    debug!(
        method = %method,
        uri = %uri,
        request_id = %context.request_id,
        user_agent = ?context.user_agent,
        real_ip = ?context.real_ip,
        "Handling request"
    );
}

/// The declared content type, when one is present and is not JSON
///
/// A request without a `content-type` header yields `None`, so its body is
/// still read as JSON.
pub fn non_json_content_type(headers: &HeaderMap) -> Option<String> {
    let content_type = headers.get(CONTENT_TYPE)?;
    let Ok(content_type_str) = content_type.to_str() else {
        return Some(String::from_utf8_lossy(content_type.as_bytes()).into_owned());
    };

    let mime = content_type_str
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json")) {
        None
    } else {
        Some(content_type_str.to_string())
    }
}
