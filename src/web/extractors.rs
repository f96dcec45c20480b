//! Request extractors and validation
//!
//! - [`RequestContext`]: caller metadata and the request id assigned by the
//!   logging middleware
//! - [`ValidatedJson`]: JSON body checked against a [`PayloadSchema`]
//! - [`DbSession`]: the request-scoped unit of work

use std::convert::Infallible;

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{StatusCode, request::Parts},
};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use super::{AppState, utils::non_json_content_type};
use crate::database::DbSession;
use crate::errors::AppError;
use crate::models::{
    PayloadSchema,
    schema::{BODY_FIELD, EXPECTED_OBJECT},
};

/// Request id attached to the request extensions by the logging middleware
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Request context information
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub user_agent: Option<String>,
    pub real_ip: Option<String>,
    pub request_id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_agent = parts
            .headers
            .get("user-agent")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());

        let real_ip = parts
            .headers
            .get("x-real-ip")
            .or_else(|| parts.headers.get("x-forwarded-for"))
            .and_then(|h| h.to_str().ok())
            .map(|s| s.split(',').next().unwrap_or(s).trim().to_string());

        let request_id = parts
            .extensions
            .get::<RequestId>()
            .map(|id| id.0.clone())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Ok(Self {
            user_agent,
            real_ip,
            request_id,
            timestamp: chrono::Utc::now(),
        })
    }
}

/// JSON body validated against the payload's field schema
///
/// A body without a content type is read as JSON. A body declared with any
/// other content type, one that cannot be parsed, or one failing a field check
/// is rejected with 422. Bodies over `web.max_request_size` are rejected with 413.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T> FromRequest<AppState> for ValidatedJson<T>
where
    T: PayloadSchema,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(content_type) = non_json_content_type(req.headers()) {
            debug!("Rejecting body declared as {}", content_type);
            return Err(AppError::field(BODY_FIELD, EXPECTED_OBJECT));
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge {
                    max: state.config.web.max_request_size,
                }
            } else {
                AppError::field(BODY_FIELD, rejection.body_text())
            }
        })?;

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::field(BODY_FIELD, format!("Invalid JSON: {e}")))?;

        T::validate(value)
            .map(ValidatedJson)
            .map_err(AppError::validation)
    }
}

impl FromRequestParts<AppState> for DbSession {
    type Rejection = Infallible;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.database.session())
    }
}
