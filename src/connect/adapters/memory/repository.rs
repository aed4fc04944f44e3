//! In-memory connection repository for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::connect::{
    domain::{ConnectionId, Service, ServiceConnection, ServiceIdentifier, UserId},
    ports::{ConnectionRepository, ConnectionRepositoryError, ConnectionRepositoryResult},
};

/// Thread-safe in-memory connection repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConnectionRepository {
    state: Arc<RwLock<HashMap<ConnectionId, ServiceConnection>>>,
}

impl InMemoryConnectionRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn save_service_connection(
        &self,
        connection: &ServiceConnection,
    ) -> ConnectionRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ConnectionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        let same_service = || {
            state
                .values()
                .filter(|existing| existing.service() == connection.service())
        };
        if same_service().any(|existing| existing.user_id() == connection.user_id()) {
            return Err(ConnectionRepositoryError::DuplicateUserService {
                user_id: connection.user_id(),
                service: connection.service(),
            });
        }
        if same_service().any(|existing| existing.identifier() == connection.identifier()) {
            return Err(ConnectionRepositoryError::DuplicateIdentifier {
                service: connection.service(),
                identifier: connection.identifier().clone(),
            });
        }

        state.insert(connection.id(), connection.clone());
        Ok(())
    }

    async fn is_user_already_connected(
        &self,
        user_id: UserId,
        service: Service,
    ) -> ConnectionRepositoryResult<bool> {
        let state = self.state.read().map_err(|err| {
            ConnectionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .values()
            .any(|existing| existing.user_id() == user_id && existing.service() == service))
    }

    async fn is_identifier_already_taken(
        &self,
        service: Service,
        identifier: &ServiceIdentifier,
    ) -> ConnectionRepositoryResult<bool> {
        let state = self.state.read().map_err(|err| {
            ConnectionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .values()
            .any(|existing| existing.service() == service && existing.identifier() == identifier))
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> ConnectionRepositoryResult<Vec<ServiceConnection>> {
        let state = self.state.read().map_err(|err| {
            ConnectionRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut connections: Vec<ServiceConnection> = state
            .values()
            .filter(|existing| existing.user_id() == user_id)
            .cloned()
            .collect();
        connections.sort_by_key(ServiceConnection::service);
        Ok(connections)
    }
}
