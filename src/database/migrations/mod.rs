//! SeaORM migrations for the series schema
//!
//! Migrations are written against the SeaQuery schema builder so the same
//! definitions run on SQLite, PostgreSQL and MySQL.

use sea_orm_migration::prelude::*;

pub mod m20240601_000001_create_series_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240601_000001_create_series_table::Migration)]
    }
}
