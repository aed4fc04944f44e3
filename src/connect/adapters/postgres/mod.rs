//! `PostgreSQL` adapter for service connection persistence.

mod models;
mod repository;
mod schema;

pub use repository::PostgresConnectionRepository;
