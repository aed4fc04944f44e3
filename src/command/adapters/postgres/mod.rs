//! `PostgreSQL` adapter for command registry persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresCommandRegistry;
