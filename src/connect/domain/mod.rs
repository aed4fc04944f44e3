//! Domain model for user to external service connections.

mod connection;
mod error;
mod identifier;
mod ids;
mod service;

pub use connection::{PersistedConnectionData, ServiceConnection};
pub use error::{ConnectDomainError, ParseServiceError};
pub use identifier::ServiceIdentifier;
pub use ids::{ConnectionId, UserId};
pub use service::Service;
