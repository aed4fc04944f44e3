//! Persisted record of a remotely registered command.

use serde::{Deserialize, Serialize};

use super::{CommandName, CommandScope, RemoteCommandId};

/// Identity of a command the gateway accepted, tracked per scope.
///
/// At most one record exists per `(scope, name)` and per `(scope, remote_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredCommand {
    remote_id: RemoteCommandId,
    name: CommandName,
    scope: CommandScope,
}

impl RegisteredCommand {
    /// Creates a registration record.
    #[must_use]
    pub const fn new(remote_id: RemoteCommandId, name: CommandName, scope: CommandScope) -> Self {
        Self {
            remote_id,
            name,
            scope,
        }
    }

    /// Returns the gateway-assigned identifier.
    #[must_use]
    pub const fn remote_id(&self) -> RemoteCommandId {
        self.remote_id
    }

    /// Returns the command name.
    #[must_use]
    pub const fn name(&self) -> &CommandName {
        &self.name
    }

    /// Returns the registration scope.
    #[must_use]
    pub const fn scope(&self) -> CommandScope {
        self.scope
    }
}
