//! HTTP middleware
//!
//! Request logging and request-size limiting.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, Uri, header::CONTENT_LENGTH},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::{AppState, extractors::RequestId};
use crate::errors::AppError;

/// Request logging middleware
///
/// Assigns each request an id, exposes it to handlers through
/// [`RequestId`], and logs completion with status and timing.
pub async fn request_logging_middleware(
    method: Method,
    uri: Uri,
    mut request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();
    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    info!(
        method = %method,
        uri = %uri,
        request_id = %request_id,
        "HTTP request started"
    );

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let duration = start.elapsed();

    if status >= 400 {
        warn!(
            method = %method,
            uri = %uri,
            status = status,
            request_id = %request_id,
            duration_ms = duration.as_millis(),
            "HTTP request completed with error"
        );
    } else {
        info!(
            method = %method,
            uri = %uri,
            status = status,
            request_id = %request_id,
            duration_ms = duration.as_millis(),
            "HTTP request completed"
        );
    }

    response
}

/// Request size limiting middleware
///
/// Rejects requests whose declared length exceeds `web.max_request_size`.
/// Bodies without a declared length are capped while they are read.
pub async fn request_size_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Response {
    let max_request_size = state.config.web.max_request_size;

    if let Some(content_length) = headers.get(CONTENT_LENGTH)
        && let Ok(length_str) = content_length.to_str()
        && let Ok(length) = length_str.parse::<usize>()
        && length > max_request_size
    {
        debug!("Declared length {} exceeds {} bytes", length, max_request_size);
        return AppError::PayloadTooLarge {
            max: max_request_size,
        }
        .into_response();
    }

    next.run(request).await
}
