//! Repository port for remote command identity tracking.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::command::domain::{
    CommandName, CommandScope, GuildId, RegisteredCommand, RemoteCommandId,
};

/// Result type for command registry operations.
pub type CommandRegistryResult<T> = Result<T, CommandRegistryError>;

/// Durable record of which remote identifier belongs to which command name,
/// partitioned by scope.
///
/// Global rows and guild rows never collide: every query is keyed by the
/// scope it was given.
#[async_trait]
pub trait CommandRegistryRepository: Send + Sync {
    /// Stores a new registration.
    ///
    /// # Errors
    ///
    /// Returns [`CommandRegistryError::DuplicateName`] when the scope already
    /// tracks the name or [`CommandRegistryError::DuplicateRemoteId`] when it
    /// already tracks the remote identifier.
    async fn save(&self, command: &RegisteredCommand) -> CommandRegistryResult<()>;

    /// Finds the remote identifier registered for `name` in `scope`.
    async fn find_id_by_name(
        &self,
        scope: CommandScope,
        name: &CommandName,
    ) -> CommandRegistryResult<Option<RemoteCommandId>>;

    /// Returns whether `name` is registered in `scope`.
    async fn exists_by_name(
        &self,
        scope: CommandScope,
        name: &CommandName,
    ) -> CommandRegistryResult<bool>;

    /// Returns the identifiers in `scope` whose names are not in `names`.
    ///
    /// This is the dangling set of a reconciliation pass.
    async fn find_ids_not_in_names(
        &self,
        scope: CommandScope,
        names: &[CommandName],
    ) -> CommandRegistryResult<BTreeSet<RemoteCommandId>>;

    /// Removes the registration with `remote_id` from `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandRegistryError::NotFound`] when no such row exists.
    async fn remove_by_id(
        &self,
        scope: CommandScope,
        remote_id: RemoteCommandId,
    ) -> CommandRegistryResult<()>;

    /// Lists the registrations of `scope` ordered by name.
    async fn list(&self, scope: CommandScope) -> CommandRegistryResult<Vec<RegisteredCommand>>;

    /// Returns every guild that has at least one registration, ascending.
    async fn known_guilds(&self) -> CommandRegistryResult<Vec<GuildId>>;
}

/// Errors returned by command registry implementations.
#[derive(Debug, Clone, Error)]
pub enum CommandRegistryError {
    /// The scope already tracks a command with this name.
    #[error("command {name} is already registered in {scope}")]
    DuplicateName {
        /// Scope of the conflicting row.
        scope: CommandScope,
        /// Conflicting name.
        name: CommandName,
    },

    /// The scope already tracks this remote identifier.
    #[error("remote command {remote_id} is already registered in {scope}")]
    DuplicateRemoteId {
        /// Scope of the conflicting row.
        scope: CommandScope,
        /// Conflicting identifier.
        remote_id: RemoteCommandId,
    },

    /// No registration with the identifier exists in the scope.
    #[error("remote command {remote_id} is not registered in {scope}")]
    NotFound {
        /// Scope that was searched.
        scope: CommandScope,
        /// Missing identifier.
        remote_id: RemoteCommandId,
    },

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommandRegistryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
