//! Centralized error handling for the series API
//!
//! Errors are layered: the repository layer reports [`RepositoryError`],
//! which the web layer lifts into [`AppError`] before mapping it onto an
//! HTTP status.
//!
//! # Error Categories
//!
//! - **Repository Errors**: connection and query failures from SeaORM
//! - **Validation Errors**: inbound payloads that do not fit the schema
//! - **Payload Too Large**: bodies over the configured request size
//!
//! # Usage
//!
//! ```rust
//! use series_api::errors::{AppError, AppResult};
//!
//! fn parse_year(raw: &str) -> AppResult<i32> {
//!     raw.parse()
//!         .map_err(|_| AppError::field("ano", "Input should be a valid integer"))
//! }
//!
//! assert!(parse_year("2017").is_ok());
//! assert!(matches!(parse_year("not-a-year"), Err(AppError::Validation { .. })));
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Repository Results
pub type RepositoryResult<T> = Result<T, RepositoryError>;
