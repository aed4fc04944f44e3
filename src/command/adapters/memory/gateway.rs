//! In-memory command gateway that records every call.
//!
//! The gateway keeps remote definitions per scope, hands out increasing
//! identifiers and can be told to fail for specific command names or to act
//! unreachable. Tests use the call log to assert which remote mutations a
//! reconciliation pass performed.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::command::{
    domain::{CommandDescriptor, CommandScope, RemoteCommand, RemoteCommandId},
    ports::{CommandGateway, CommandGatewayError, CommandGatewayResult, CreatedCommand},
};

const FIRST_REMOTE_ID: u64 = 1_000;

/// One call received by [`InMemoryCommandGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    /// A create request for the named command.
    Create {
        /// Target scope.
        scope: CommandScope,
        /// Declared name.
        name: String,
    },
    /// A modify request.
    Modify {
        /// Target scope.
        scope: CommandScope,
        /// Target identifier.
        id: RemoteCommandId,
    },
    /// A delete request.
    Delete {
        /// Target scope.
        scope: CommandScope,
        /// Target identifier.
        id: RemoteCommandId,
    },
    /// A fetch request.
    Fetch {
        /// Target scope.
        scope: CommandScope,
        /// Target identifier.
        id: RemoteCommandId,
    },
}

impl GatewayCall {
    /// Returns whether the call changes remote state.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::Fetch { .. })
    }
}

/// Thread-safe in-memory gateway.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommandGateway {
    state: Arc<RwLock<GatewayState>>,
}

#[derive(Debug, Default)]
struct GatewayState {
    next_id: u64,
    commands: BTreeMap<(CommandScope, RemoteCommandId), RemoteCommand>,
    calls: Vec<GatewayCall>,
    failing_names: BTreeSet<String>,
    unreachable: bool,
}

impl GatewayState {
    fn check_reachable(&self) -> CommandGatewayResult<()> {
        if self.unreachable {
            return Err(CommandGatewayError::transport(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "gateway unreachable",
            )));
        }
        Ok(())
    }

    fn check_name(&self, name: &str) -> CommandGatewayResult<()> {
        if self.failing_names.contains(name) {
            return Err(CommandGatewayError::Rejected(format!(
                "injected failure for {name}"
            )));
        }
        Ok(())
    }

    fn existing(
        &self,
        scope: CommandScope,
        id: RemoteCommandId,
    ) -> CommandGatewayResult<&RemoteCommand> {
        self.commands
            .get(&(scope, id))
            .ok_or(CommandGatewayError::UnknownCommand { scope, id })
    }
}

fn lock_error(err: &impl ToString) -> CommandGatewayError {
    CommandGatewayError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryCommandGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call touching the named command fail.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn fail_for(&self, name: impl Into<String>) -> CommandGatewayResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.failing_names.insert(name.into());
        Ok(())
    }

    /// Clears injected failures.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn heal(&self) -> CommandGatewayResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.failing_names.clear();
        state.unreachable = false;
        Ok(())
    }

    /// Makes every call fail with a transport error.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn set_unreachable(&self, unreachable: bool) -> CommandGatewayResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.unreachable = unreachable;
        Ok(())
    }

    /// Drops a remote definition without recording a call, as if it was
    /// removed out of band.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn forget(&self, scope: CommandScope, id: RemoteCommandId) -> CommandGatewayResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.commands.remove(&(scope, id));
        Ok(())
    }

    /// Replaces a remote definition without recording a call, as if it was
    /// edited out of band.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn overwrite(&self, scope: CommandScope, command: RemoteCommand) -> CommandGatewayResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.commands.insert((scope, command.id()), command);
        Ok(())
    }

    /// Returns the remote definitions of `scope` ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn commands(&self, scope: CommandScope) -> CommandGatewayResult<Vec<RemoteCommand>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state
            .commands
            .iter()
            .filter(|((command_scope, _), _)| *command_scope == scope)
            .map(|(_, command)| command.clone())
            .collect())
    }

    /// Returns every call received so far.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn calls(&self) -> CommandGatewayResult<Vec<GatewayCall>> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.calls.clone())
    }

    /// Returns the number of create, modify and delete calls received.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn mutation_count(&self) -> CommandGatewayResult<usize> {
        let state = self.state.read().map_err(|err| lock_error(&err))?;
        Ok(state.calls.iter().filter(|call| call.is_mutation()).count())
    }
}

#[async_trait]
impl CommandGateway for InMemoryCommandGateway {
    async fn create(
        &self,
        scope: CommandScope,
        descriptor: &CommandDescriptor,
    ) -> CommandGatewayResult<CreatedCommand> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.calls.push(GatewayCall::Create {
            scope,
            name: descriptor.name().to_string(),
        });
        state.check_reachable()?;
        state.check_name(descriptor.name().as_str())?;

        let id = RemoteCommandId::new(FIRST_REMOTE_ID + state.next_id);
        state.next_id += 1;
        state
            .commands
            .insert((scope, id), RemoteCommand::from_descriptor(id, descriptor));
        Ok(CreatedCommand {
            id,
            name: descriptor.name().to_string(),
        })
    }

    async fn modify(
        &self,
        scope: CommandScope,
        id: RemoteCommandId,
        descriptor: &CommandDescriptor,
    ) -> CommandGatewayResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.calls.push(GatewayCall::Modify { scope, id });
        state.check_reachable()?;
        state.check_name(descriptor.name().as_str())?;
        state.existing(scope, id)?;

        state
            .commands
            .insert((scope, id), RemoteCommand::from_descriptor(id, descriptor));
        Ok(())
    }

    async fn delete(&self, scope: CommandScope, id: RemoteCommandId) -> CommandGatewayResult<()> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.calls.push(GatewayCall::Delete { scope, id });
        state.check_reachable()?;
        let name = state.existing(scope, id)?.name().to_owned();
        state.check_name(&name)?;

        state.commands.remove(&(scope, id));
        Ok(())
    }

    async fn fetch(
        &self,
        scope: CommandScope,
        id: RemoteCommandId,
    ) -> CommandGatewayResult<RemoteCommand> {
        let mut state = self.state.write().map_err(|err| lock_error(&err))?;
        state.calls.push(GatewayCall::Fetch { scope, id });
        state.check_reachable()?;
        let command = state.existing(scope, id)?.clone();
        state.check_name(command.name())?;
        Ok(command)
    }
}
