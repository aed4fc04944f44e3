//! Identifier validator backed by a fixed set of known accounts.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::connect::{
    domain::ServiceIdentifier,
    ports::{IdentifierValidationError, IdentifierValidator},
};

/// Accepts exactly the identifiers it was built with.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentifierValidator {
    known: HashSet<String>,
}

impl StaticIdentifierValidator {
    /// Creates a validator accepting `known` identifiers.
    #[must_use]
    pub fn new<I, S>(known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: known.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl IdentifierValidator for StaticIdentifierValidator {
    async fn is_valid_identifier(
        &self,
        identifier: &ServiceIdentifier,
    ) -> Result<bool, IdentifierValidationError> {
        Ok(self.known.contains(identifier.as_str()))
    }
}
