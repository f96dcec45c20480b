//! SeaORM repository implementations
//!
//! Repositories borrow a request-scoped [`DbSession`](crate::database::DbSession)
//! and work across SQLite, PostgreSQL and MySQL.

pub mod series;

pub use series::SeriesSeaOrmRepository;
