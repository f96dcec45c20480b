//! Domain models shared by the repository and web layers
//!
//! These are the shapes that cross the API boundary. Storage types live in
//! `crate::entities` and are mapped onto these by the repositories.

pub mod schema;
pub mod series;

pub use schema::{FieldError, FieldKind, FieldSpec, PayloadSchema};
pub use series::{Series, SeriesCreateRequest};
