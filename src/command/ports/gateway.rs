//! Port for the remote service that owns command registrations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::command::domain::{CommandDescriptor, CommandScope, RemoteCommand, RemoteCommandId};

/// Result type for gateway operations.
pub type CommandGatewayResult<T> = Result<T, CommandGatewayError>;

/// Identity returned by the gateway for a newly created command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedCommand {
    /// Identifier assigned by the gateway.
    pub id: RemoteCommandId,
    /// Name as echoed by the gateway.
    pub name: String,
}

/// Create, modify, delete and fetch operations against the remote command
/// registry, keyed by scope.
///
/// Implementations choose the global or guild endpoint from the scope.
#[async_trait]
pub trait CommandGateway: Send + Sync {
    /// Registers a new command in `scope`.
    async fn create(
        &self,
        scope: CommandScope,
        descriptor: &CommandDescriptor,
    ) -> CommandGatewayResult<CreatedCommand>;

    /// Replaces the definition of an existing command. The identifier is
    /// kept.
    async fn modify(
        &self,
        scope: CommandScope,
        id: RemoteCommandId,
        descriptor: &CommandDescriptor,
    ) -> CommandGatewayResult<()>;

    /// Deletes a command.
    async fn delete(&self, scope: CommandScope, id: RemoteCommandId) -> CommandGatewayResult<()>;

    /// Fetches the current remote definition of a command.
    async fn fetch(
        &self,
        scope: CommandScope,
        id: RemoteCommandId,
    ) -> CommandGatewayResult<RemoteCommand>;
}

/// Errors returned by gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum CommandGatewayError {
    /// The gateway does not know the identifier in this scope.
    #[error("remote command {id} is unknown in {scope}")]
    UnknownCommand {
        /// Scope that was addressed.
        scope: CommandScope,
        /// Identifier the gateway rejected.
        id: RemoteCommandId,
    },

    /// The call did not complete within the allotted time.
    #[error("gateway call timed out after {0:?}")]
    TimedOut(Duration),

    /// The gateway refused the request.
    #[error("gateway rejected the request: {0}")]
    Rejected(String),

    /// The gateway could not be reached or answered with an unexpected
    /// failure.
    #[error("gateway transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommandGatewayError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
