//! Routing of inbound interactions to command handlers by remote identifier.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::command::{
    domain::{CommandInteraction, InteractionReply, RemoteCommandId},
    ports::{CommandHandler, CommandHandlerError},
};

use super::{CommandCatalog, SyncReport};

/// Errors surfaced by [`InteractionDispatcher::dispatch`].
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// The handler for the command failed.
    #[error("handler for {command} failed: {source}")]
    Handler {
        /// Name of the invoked command.
        command: String,
        /// Handler failure.
        source: CommandHandlerError,
    },
}

/// Collects `remote id -> handler` routes before the dispatcher is published.
#[derive(Default)]
pub struct DispatcherBuilder {
    routes: HashMap<RemoteCommandId, Arc<dyn CommandHandler>>,
}

impl DispatcherBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes `remote_id` to `handler`.
    ///
    /// The first route registered for an identifier wins; later ones are
    /// logged and ignored.
    #[must_use]
    pub fn register(mut self, remote_id: RemoteCommandId, handler: Arc<dyn CommandHandler>) -> Self {
        if self.routes.contains_key(&remote_id) {
            warn!(%remote_id, "remote id claimed by more than one command, keeping the first");
        } else {
            self.routes.insert(remote_id, handler);
        }
        self
    }

    /// Publishes the routes.
    #[must_use]
    pub fn build(self) -> InteractionDispatcher {
        InteractionDispatcher {
            routes: self.routes,
        }
    }
}

/// Read-only routing table from remote command identifiers to handlers.
///
/// Built once after synchronization and shared across interaction tasks
/// without locking.
pub struct InteractionDispatcher {
    routes: HashMap<RemoteCommandId, Arc<dyn CommandHandler>>,
}

impl InteractionDispatcher {
    /// Starts an empty routing table.
    #[must_use]
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Routes every command the synchronization left active to its handler.
    #[must_use]
    pub fn from_report(catalog: &CommandCatalog, report: &SyncReport) -> Self {
        report
            .active()
            .filter_map(|(_, name, remote_id)| {
                catalog
                    .find(name)
                    .map(|command| (remote_id, command.handler()))
            })
            .fold(Self::builder(), |builder, (remote_id, handler)| {
                builder.register(remote_id, handler)
            })
            .build()
    }

    /// Returns whether an interaction for `remote_id` would be handled.
    #[must_use]
    pub fn routes(&self, remote_id: RemoteCommandId) -> bool {
        self.routes.contains_key(&remote_id)
    }

    /// Returns the number of routed identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns whether no identifier is routed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Hands an interaction to the handler of its command.
    ///
    /// Returns `Ok(None)` when no handler is routed for the command id; such
    /// interactions are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Handler`] when the handler fails.
    pub async fn dispatch(
        &self,
        interaction: &CommandInteraction,
    ) -> Result<Option<InteractionReply>, DispatchError> {
        let Some(handler) = self.routes.get(&interaction.command_id()) else {
            debug!(
                remote_id = %interaction.command_id(),
                command = interaction.command_name(),
                "dropping interaction for unknown command"
            );
            return Ok(None);
        };

        handler
            .handle(interaction)
            .await
            .map(Some)
            .map_err(|source| DispatchError::Handler {
                command: interaction.command_name().to_owned(),
                source,
            })
    }
}

impl std::fmt::Debug for InteractionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionDispatcher")
            .field("routes", &self.routes.len())
            .finish()
    }
}
