//! In-memory command registry for tests and dry runs.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::command::{
    domain::{CommandName, CommandScope, GuildId, RegisteredCommand, RemoteCommandId},
    ports::{CommandRegistryError, CommandRegistryRepository, CommandRegistryResult},
};

/// Thread-safe in-memory command registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommandRegistry {
    state: Arc<RwLock<BTreeMap<CommandScope, BTreeMap<CommandName, RemoteCommandId>>>>,
}

impl InMemoryCommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: &impl ToString) -> CommandRegistryError {
    CommandRegistryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CommandRegistryRepository for InMemoryCommandRegistry {
    async fn save(&self, command: &RegisteredCommand) -> CommandRegistryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let rows = state.entry(command.scope()).or_default();

        if rows.contains_key(command.name()) {
            return Err(CommandRegistryError::DuplicateName {
                scope: command.scope(),
                name: command.name().clone(),
            });
        }
        if rows.values().any(|id| *id == command.remote_id()) {
            return Err(CommandRegistryError::DuplicateRemoteId {
                scope: command.scope(),
                remote_id: command.remote_id(),
            });
        }

        rows.insert(command.name().clone(), command.remote_id());
        Ok(())
    }

    async fn find_id_by_name(
        &self,
        scope: CommandScope,
        name: &CommandName,
    ) -> CommandRegistryResult<Option<RemoteCommandId>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.get(&scope).and_then(|rows| rows.get(name)).copied())
    }

    async fn exists_by_name(
        &self,
        scope: CommandScope,
        name: &CommandName,
    ) -> CommandRegistryResult<bool> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.get(&scope).is_some_and(|rows| rows.contains_key(name)))
    }

    async fn find_ids_not_in_names(
        &self,
        scope: CommandScope,
        names: &[CommandName],
    ) -> CommandRegistryResult<BTreeSet<RemoteCommandId>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        let dangling = state
            .get(&scope)
            .map(|rows| {
                rows.iter()
                    .filter(|(name, _)| !names.contains(name))
                    .map(|(_, id)| *id)
                    .collect()
            })
            .unwrap_or_default();
        Ok(dangling)
    }

    async fn remove_by_id(
        &self,
        scope: CommandScope,
        remote_id: RemoteCommandId,
    ) -> CommandRegistryResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        let rows = state
            .get_mut(&scope)
            .ok_or(CommandRegistryError::NotFound { scope, remote_id })?;
        let before = rows.len();
        rows.retain(|_, id| *id != remote_id);
        if rows.len() == before {
            return Err(CommandRegistryError::NotFound { scope, remote_id });
        }
        if rows.is_empty() {
            state.remove(&scope);
        }
        Ok(())
    }

    async fn list(&self, scope: CommandScope) -> CommandRegistryResult<Vec<RegisteredCommand>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        let commands = state
            .get(&scope)
            .map(|rows| {
                rows.iter()
                    .map(|(name, id)| RegisteredCommand::new(*id, name.clone(), scope))
                    .collect()
            })
            .unwrap_or_default();
        Ok(commands)
    }

    async fn known_guilds(&self) -> CommandRegistryResult<Vec<GuildId>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.keys().filter_map(|scope| scope.guild_id()).collect())
    }
}
