//! The set of commands the bot declares, each paired with its handler.

use std::sync::Arc;

use thiserror::Error;

use crate::command::{
    domain::{CommandDescriptor, CommandName},
    ports::CommandHandler,
};

/// Errors raised while assembling the catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two declarations share a name.
    #[error("command {0} is declared twice")]
    DuplicateCommand(CommandName),
}

/// A declared command and the handler serving it.
#[derive(Clone)]
pub struct DeclaredCommand {
    descriptor: CommandDescriptor,
    handler: Arc<dyn CommandHandler>,
}

impl DeclaredCommand {
    /// Pairs a descriptor with its handler.
    #[must_use]
    pub fn new(descriptor: CommandDescriptor, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            descriptor,
            handler,
        }
    }

    /// Returns the declaration.
    #[must_use]
    pub const fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    /// Returns the handler.
    #[must_use]
    pub fn handler(&self) -> Arc<dyn CommandHandler> {
        Arc::clone(&self.handler)
    }
}

impl std::fmt::Debug for DeclaredCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeclaredCommand")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Fixed set of declared commands, unique by name.
#[derive(Debug, Clone, Default)]
pub struct CommandCatalog {
    commands: Vec<DeclaredCommand>,
}

impl CommandCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declared command.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateCommand`] when the name is taken.
    pub fn with_command(
        mut self,
        descriptor: CommandDescriptor,
        handler: Arc<dyn CommandHandler>,
    ) -> Result<Self, CatalogError> {
        if self.find(descriptor.name()).is_some() {
            return Err(CatalogError::DuplicateCommand(descriptor.name().clone()));
        }
        self.commands.push(DeclaredCommand::new(descriptor, handler));
        Ok(self)
    }

    /// Returns the declarations in catalog order.
    #[must_use]
    pub fn descriptors(&self) -> Vec<CommandDescriptor> {
        self.commands
            .iter()
            .map(|command| command.descriptor.clone())
            .collect()
    }

    /// Finds a declared command by name.
    #[must_use]
    pub fn find(&self, name: &CommandName) -> Option<&DeclaredCommand> {
        self.commands
            .iter()
            .find(|command| command.descriptor.name() == name)
    }

    /// Returns the number of declared commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns whether nothing is declared.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
