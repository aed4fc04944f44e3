//! Error types for service connection domain validation.

use thiserror::Error;

/// Maximum length of a service identifier in characters.
pub(super) const MAX_IDENTIFIER_LENGTH: usize = 255;

/// Errors returned while validating connection inputs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectDomainError {
    /// The identifier is empty after trimming.
    #[error("service identifier must not be empty")]
    EmptyIdentifier,

    /// The identifier is longer than allowed.
    #[error("service identifier must be at most 255 characters, got {0}")]
    IdentifierTooLong(usize),
}

/// Error returned when a service name cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown service: {0}")]
pub struct ParseServiceError(pub String);
