//! Error type definitions for the series API

use thiserror::Error;

use crate::models::FieldError;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Repository layer errors
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Inbound payload failed one or more field checks
    #[error("Validation failed: {}", join_field_errors(.errors))]
    Validation { errors: Vec<FieldError> },

    /// Request body larger than `web.max_request_size`
    #[error("Request too large (max: {max} bytes)")]
    PayloadTooLarge { max: usize },
}

/// Repository layer specific errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database errors from SeaORM
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl AppError {
    /// Create a validation error from field-level failures
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation { errors }
    }

    /// Create a validation error concerning a single field
    pub fn field<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::Validation {
            errors: vec![FieldError::new(field, message)],
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
