//! Guarded write flow that links a user to an external service account.
//!
//! Provides [`ConnectService`], which rejects duplicate users and claimed
//! identifiers before asking the external service whether the account exists.

use crate::connect::{
    domain::{ConnectDomainError, Service, ServiceConnection, ServiceIdentifier, UserId},
    ports::{
        ConnectionRepository, ConnectionRepositoryError, IdentifierValidationError,
        IdentifierValidator,
    },
};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Result of a connect attempt the user is told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The connection was stored.
    Connected(ServiceConnection),
    /// The user already has a connection to the service.
    AlreadyConnected,
    /// Another user already claimed the identifier on the service.
    IdentifierTaken,
    /// The service does not know the identifier.
    InvalidIdentifier,
}

/// Service-level errors for connect operations.
#[derive(Debug, Error)]
pub enum ConnectServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Domain(#[from] ConnectDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ConnectionRepositoryError),
    /// The external service gave no usable answer.
    #[error(transparent)]
    Validation(#[from] IdentifierValidationError),
    /// No validator is registered for the service.
    #[error("no identifier validator registered for {0}")]
    NoValidator(Service),
}

/// Result type for connect service operations.
pub type ConnectServiceResult<T> = Result<T, ConnectServiceError>;

/// Connect orchestration service.
#[derive(Clone)]
pub struct ConnectService<R, C>
where
    R: ConnectionRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    validators: HashMap<Service, Arc<dyn IdentifierValidator>>,
}

impl<R, C> ConnectService<R, C>
where
    R: ConnectionRepository,
    C: Clock + Send + Sync,
{
    /// Creates a service without validators.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            validators: HashMap::new(),
        }
    }

    /// Registers the validator consulted for `service`.
    #[must_use]
    pub fn with_validator(mut self, service: Service, validator: Arc<dyn IdentifierValidator>) -> Self {
        self.validators.insert(service, validator);
        self
    }

    /// Connects `user_id` to `identifier` on `service`.
    ///
    /// The external service is only asked once the user is known to be
    /// unconnected and the identifier unclaimed.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectServiceError`] when the identifier is malformed, the
    /// repository fails, the service cannot be asked or no validator is
    /// registered for it.
    pub async fn connect(
        &self,
        user_id: UserId,
        service: Service,
        identifier: &str,
    ) -> ConnectServiceResult<ConnectOutcome> {
        let service_identifier = ServiceIdentifier::new(identifier)?;

        if self
            .repository
            .is_user_already_connected(user_id, service)
            .await?
        {
            return Ok(ConnectOutcome::AlreadyConnected);
        }
        if self
            .repository
            .is_identifier_already_taken(service, &service_identifier)
            .await?
        {
            return Ok(ConnectOutcome::IdentifierTaken);
        }

        let validator = self
            .validators
            .get(&service)
            .ok_or(ConnectServiceError::NoValidator(service))?;
        if !validator.is_valid_identifier(&service_identifier).await? {
            return Ok(ConnectOutcome::InvalidIdentifier);
        }

        let connection = ServiceConnection::new(user_id, service, service_identifier, &*self.clock);
        match self.repository.save_service_connection(&connection).await {
            Ok(()) => Ok(ConnectOutcome::Connected(connection)),
            Err(ConnectionRepositoryError::DuplicateUserService { .. }) => {
                Ok(ConnectOutcome::AlreadyConnected)
            }
            Err(ConnectionRepositoryError::DuplicateIdentifier { .. }) => {
                Ok(ConnectOutcome::IdentifierTaken)
            }
            Err(err) => Err(err.into()),
        }
    }
}
