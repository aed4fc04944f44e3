//! Port for checking identifiers against the external service.

use crate::connect::domain::ServiceIdentifier;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised while asking a service whether an identifier exists.
#[derive(Debug, Clone, Error)]
pub enum IdentifierValidationError {
    /// The service answered with an unexpected status.
    #[error("unexpected response status {0}")]
    UnexpectedStatus(u16),

    /// The service could not be reached.
    #[error("validation request failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentifierValidationError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}

/// Checks whether an account exists on one external service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentifierValidator: Send + Sync {
    /// Returns `true` when the identifier names an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierValidationError`] when the answer is inconclusive.
    async fn is_valid_identifier(
        &self,
        identifier: &ServiceIdentifier,
    ) -> Result<bool, IdentifierValidationError>;
}
