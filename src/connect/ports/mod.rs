//! Port contracts for service connections.

pub mod repository;
pub mod validator;

pub use repository::{ConnectionRepository, ConnectionRepositoryError, ConnectionRepositoryResult};
pub use validator::{IdentifierValidationError, IdentifierValidator};

#[cfg(test)]
pub use validator::MockIdentifierValidator;
