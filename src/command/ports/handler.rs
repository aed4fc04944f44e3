//! Port implemented by each command body.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::command::domain::{CommandInteraction, InteractionError, InteractionReply};

/// Handles interactions for one declared command.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Produces the reply for an interaction.
    ///
    /// # Errors
    ///
    /// Returns [`CommandHandlerError`] when the interaction is malformed or a
    /// collaborator of the handler fails.
    async fn handle(
        &self,
        interaction: &CommandInteraction,
    ) -> Result<InteractionReply, CommandHandlerError>;
}

/// Errors raised while handling an interaction.
#[derive(Debug, Clone, Error)]
pub enum CommandHandlerError {
    /// The interaction did not carry the expected options.
    #[error(transparent)]
    Interaction(#[from] InteractionError),

    /// A collaborator of the handler failed.
    #[error("command handler failed: {0}")]
    Failed(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommandHandlerError {
    /// Wraps a collaborator failure.
    pub fn failed(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Failed(Arc::new(err))
    }
}
