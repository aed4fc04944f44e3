//! Landau: a chat bot that keeps its slash commands in sync with the
//! platform and links users to external service accounts.
//!
//! # Architecture
//!
//! Landau follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`command`]: Command declaration, synchronization and dispatch
//! - [`connect`]: User to external service connections
//! - [`bot`]: Command bodies and the platform event handler
//! - [`config`]: Layered runtime configuration
//! - [`db`]: Connection pool and schema bootstrap
//! - [`telemetry`]: Tracing subscriber setup

pub mod bot;
pub mod command;
pub mod config;
pub mod connect;
pub mod db;
pub mod telemetry;
