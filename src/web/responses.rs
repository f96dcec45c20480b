//! HTTP response types and utilities
//!
//! Successful series operations answer with the bare resource. Every non-2xx
//! response shares the [`ApiResponse`] envelope so clients can rely on a
//! single error shape.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::errors::AppError;

/// Standard API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Whether the operation was successful
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Field-level error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, String>>,
    /// Response timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            details: None,
            timestamp: chrono::Utc::now(),
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            details: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Create an error response with details
    pub fn error_with_details(message: String, details: HashMap<String, String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            details: Some(details),
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Convert AppError to appropriate HTTP response
pub fn handle_error(error: AppError) -> Response {
    match error {
        AppError::Validation { errors } => {
            let details: HashMap<String, String> = errors
                .into_iter()
                .map(|error| (error.field, error.message))
                .collect();

            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::error_with_details(
                    "Validation failed".to_string(),
                    details,
                )),
            )
                .into_response()
        }
        AppError::PayloadTooLarge { .. } => (
            StatusCode::PAYLOAD_TOO_LARGE,
            Json(ApiResponse::error(error.to_string())),
        )
            .into_response(),
        AppError::Repository(_) => {
            tracing::error!("Request failed: {}", error);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Data access failed".to_string())),
            )
                .into_response()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        handle_error(self)
    }
}

/// Success response helpers
pub fn ok<T: Serialize>(data: T) -> impl IntoResponse {
    (StatusCode::OK, Json(ApiResponse::success(data)))
}

/// Database health status
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatabaseHealth {
    pub status: String,
    pub backend: String,
}

/// Health check payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: DatabaseHealth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthResponse {
    pub fn healthy(database: DatabaseHealth) -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
            message: None,
        }
    }

    pub fn unhealthy(database: DatabaseHealth, message: String) -> Self {
        Self {
            status: "unhealthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
            message: Some(message),
        }
    }
}
