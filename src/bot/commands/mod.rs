//! Command bodies offered by the bot.

mod connect;
mod info;

pub use connect::ConnectCommand;
pub use info::{BotIdentity, InfoCommand, InfoSubject, SEA_GREEN};

use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

use crate::command::{
    domain::CommandDomainError,
    services::{CatalogError, CommandCatalog},
};
use crate::bot::performance::PerformanceMonitor;
use crate::connect::ports::ConnectionRepository;

/// Errors raised while declaring the bot's commands.
#[derive(Debug, Error)]
pub enum DeclarationError {
    /// A command declaration is invalid.
    #[error(transparent)]
    Descriptor(#[from] CommandDomainError),
    /// Two commands share a name.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Declares `/info` and `/connect` with their handlers.
///
/// # Errors
///
/// Returns [`DeclarationError`] when a declaration is rejected; the bot must
/// not start in that case.
pub fn catalog<R, C, M>(
    info: InfoCommand<M>,
    connect: ConnectCommand<R, C>,
) -> Result<CommandCatalog, DeclarationError>
where
    R: ConnectionRepository + 'static,
    C: Clock + Send + Sync + 'static,
    M: PerformanceMonitor + 'static,
{
    Ok(CommandCatalog::new()
        .with_command(InfoCommand::<M>::descriptor()?, Arc::new(info))?
        .with_command(ConnectCommand::<R, C>::descriptor()?, Arc::new(connect))?)
}
