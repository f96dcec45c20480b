//! SeaORM entity definitions
//!
//! Storage-side representation of every table. Handlers and the API schema
//! never see these types directly; repositories map them onto `crate::models`.

pub mod prelude;

pub mod series;
