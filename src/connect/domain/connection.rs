//! Link between a chat user and an account on an external service.

use super::{ConnectionId, Service, ServiceIdentifier, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A user's account on one external service.
///
/// Each user connects at most once per service and each identifier belongs to
/// at most one user per service. Connections are never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConnection {
    id: ConnectionId,
    user_id: UserId,
    service: Service,
    identifier: ServiceIdentifier,
    connected_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedConnectionData {
    /// Persisted identifier.
    pub id: ConnectionId,
    /// Persisted user.
    pub user_id: UserId,
    /// Persisted service.
    pub service: Service,
    /// Persisted account identifier.
    pub identifier: ServiceIdentifier,
    /// Persisted creation timestamp.
    pub connected_at: DateTime<Utc>,
}

impl ServiceConnection {
    /// Creates a new connection stamped with the current time.
    #[must_use]
    pub fn new(
        user_id: UserId,
        service: Service,
        identifier: ServiceIdentifier,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ConnectionId::new(),
            user_id,
            service,
            identifier,
            connected_at: clock.utc(),
        }
    }

    /// Reconstructs a connection from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedConnectionData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            service: data.service,
            identifier: data.identifier,
            connected_at: data.connected_at,
        }
    }

    /// Returns the connection identifier.
    #[must_use]
    pub const fn id(&self) -> ConnectionId {
        self.id
    }

    /// Returns the connected user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the service.
    #[must_use]
    pub const fn service(&self) -> Service {
        self.service
    }

    /// Returns the account identifier.
    #[must_use]
    pub const fn identifier(&self) -> &ServiceIdentifier {
        &self.identifier
    }

    /// Returns when the connection was made.
    #[must_use]
    pub const fn connected_at(&self) -> DateTime<Utc> {
        self.connected_at
    }
}
