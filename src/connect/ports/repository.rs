//! Repository port for service connection persistence.

use crate::connect::domain::{Service, ServiceConnection, ServiceIdentifier, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for connection repository operations.
pub type ConnectionRepositoryResult<T> = Result<T, ConnectionRepositoryError>;

/// Service connection persistence contract.
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// Stores a new connection.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectionRepositoryError::DuplicateUserService`] when the
    /// user is already connected to the service or
    /// [`ConnectionRepositoryError::DuplicateIdentifier`] when the identifier
    /// is already claimed for the service.
    async fn save_service_connection(
        &self,
        connection: &ServiceConnection,
    ) -> ConnectionRepositoryResult<()>;

    /// Returns whether the user already has a connection to `service`.
    async fn is_user_already_connected(
        &self,
        user_id: UserId,
        service: Service,
    ) -> ConnectionRepositoryResult<bool>;

    /// Returns whether any user already claimed `identifier` on `service`.
    async fn is_identifier_already_taken(
        &self,
        service: Service,
        identifier: &ServiceIdentifier,
    ) -> ConnectionRepositoryResult<bool>;

    /// Returns every connection of a user ordered by service.
    async fn find_by_user(&self, user_id: UserId)
    -> ConnectionRepositoryResult<Vec<ServiceConnection>>;
}

/// Errors returned by connection repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ConnectionRepositoryError {
    /// The user already has a connection to the service.
    #[error("user {user_id} is already connected to {service}")]
    DuplicateUserService {
        /// Connected user.
        user_id: UserId,
        /// Service.
        service: Service,
    },

    /// The identifier is already claimed on the service.
    #[error("identifier {identifier} is already taken on {service}")]
    DuplicateIdentifier {
        /// Service.
        service: Service,
        /// Claimed identifier.
        identifier: ServiceIdentifier,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ConnectionRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
