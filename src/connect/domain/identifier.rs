//! Account identifier on an external service.

use super::{ConnectDomainError, error::MAX_IDENTIFIER_LENGTH};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trimmed, non-empty account identifier on an external service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceIdentifier(String);

impl ServiceIdentifier {
    /// Creates a validated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectDomainError::EmptyIdentifier`] for blank input or
    /// [`ConnectDomainError::IdentifierTooLong`] past 255 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ConnectDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConnectDomainError::EmptyIdentifier);
        }
        let length = trimmed.chars().count();
        if length > MAX_IDENTIFIER_LENGTH {
            return Err(ConnectDomainError::IdentifierTooLong(length));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ServiceIdentifier {
    type Error = ConnectDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ServiceIdentifier> for String {
    fn from(value: ServiceIdentifier) -> Self {
        value.0
    }
}

impl AsRef<str> for ServiceIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
