//! Reconciliation of remote command registrations against declarations.
//!
//! [`CommandSynchronizer::reconcile`] converges one scope in two phases.
//! First every enabled command is created, or fetched and updated when its
//! remote definition drifted, concurrently and with failures isolated per
//! command. Once all of them have settled, the registry is asked for the
//! dangling set (rows whose names are no longer enabled) and each of those is
//! deleted remotely and then forgotten locally.
//!
//! [`CommandSynchronizer::synchronize`] runs `reconcile` for the global scope
//! and every guild scope at once.

use std::collections::BTreeSet;
use std::future::Future;
use std::iter;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, error, info, warn};

use crate::command::{
    domain::{
        CommandDescriptor, CommandName, CommandScope, CommandsConfig, GuildId, RegisteredCommand,
        RemoteCommandId,
    },
    ports::{
        CommandGateway, CommandGatewayError, CommandGatewayResult, CommandRegistryError,
        CommandRegistryRepository,
    },
};

use super::report::{CommandChange, CommandOutcome, ScopeReport, SyncReport};

/// Timeout applied to each gateway call unless configured otherwise.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Converges remote registrations to the enabled declared commands.
#[derive(Clone)]
pub struct CommandSynchronizer<R, G>
where
    R: CommandRegistryRepository,
    G: CommandGateway,
{
    registry: Arc<R>,
    gateway: Arc<G>,
    config: Arc<CommandsConfig>,
    call_timeout: Duration,
}

impl<R, G> CommandSynchronizer<R, G>
where
    R: CommandRegistryRepository,
    G: CommandGateway,
{
    /// Creates a synchronizer with the default per-call timeout.
    #[must_use]
    pub const fn new(registry: Arc<R>, gateway: Arc<G>, config: Arc<CommandsConfig>) -> Self {
        Self {
            registry,
            gateway,
            config,
            call_timeout: DEFAULT_CALL_TIMEOUT,
        }
    }

    /// Overrides the per-call gateway timeout.
    #[must_use]
    pub const fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Reconciles the global scope and every guild scope concurrently.
    ///
    /// Guild scopes are the configured guilds plus every guild the registry
    /// still holds rows for, so a guild dropped from the configuration
    /// converges to no commands.
    pub async fn synchronize(&self, declared: &[CommandDescriptor]) -> SyncReport {
        let scopes = self.scopes().await;
        let reports = join_all(scopes.into_iter().map(|scope| self.reconcile(scope, declared))).await;
        SyncReport::new(reports)
    }

    /// Converges `scope` to the commands of `declared` enabled in it.
    ///
    /// Never fails as a whole: every failed gateway or registry call is
    /// logged, counted in the report and retried on the next pass.
    pub async fn reconcile(&self, scope: CommandScope, declared: &[CommandDescriptor]) -> ScopeReport {
        let enabled: Vec<&CommandDescriptor> = declared
            .iter()
            .filter(|descriptor| self.config.is_enabled(scope, descriptor.name()))
            .collect();

        let outcomes = join_all(
            enabled
                .iter()
                .map(|descriptor| self.converge(scope, descriptor)),
        )
        .await;

        let mut report = ScopeReport::new(scope);
        for (descriptor, outcome) in enabled.iter().zip(outcomes) {
            report.record(descriptor.name(), outcome);
        }

        let names: Vec<CommandName> = enabled
            .iter()
            .map(|descriptor| descriptor.name().clone())
            .collect();
        match self.registry.find_ids_not_in_names(scope, &names).await {
            Ok(dangling) => {
                let deletions =
                    join_all(dangling.into_iter().map(|id| self.remove_dangling(scope, id))).await;
                for deleted in deletions {
                    report.record_deletion(deleted);
                }
            }
            Err(err) => {
                error!(%scope, error = %err, "failed to query dangling commands");
                report.record_deletion(false);
            }
        }

        report
    }

    async fn scopes(&self) -> Vec<CommandScope> {
        let mut guilds: BTreeSet<GuildId> = self.config.guild_ids().collect();
        match self.registry.known_guilds().await {
            Ok(known) => guilds.extend(known),
            Err(err) => warn!(error = %err, "failed to list guilds with registered commands"),
        }
        iter::once(CommandScope::Global)
            .chain(guilds.into_iter().map(CommandScope::Guild))
            .collect()
    }

    async fn converge(&self, scope: CommandScope, descriptor: &CommandDescriptor) -> CommandOutcome {
        match self.registry.find_id_by_name(scope, descriptor.name()).await {
            Ok(None) => self.create(scope, descriptor).await,
            Ok(Some(remote_id)) => self.refresh(scope, remote_id, descriptor).await,
            Err(err) => {
                error!(%scope, command = %descriptor.name(), error = %err, "failed to look up command");
                CommandOutcome::failed(None)
            }
        }
    }

    async fn create(&self, scope: CommandScope, descriptor: &CommandDescriptor) -> CommandOutcome {
        let created = match self.call(self.gateway.create(scope, descriptor)).await {
            Ok(created) => created,
            Err(err) => {
                error!(%scope, command = %descriptor.name(), error = %err, "failed to create command");
                return CommandOutcome::failed(None);
            }
        };

        let registered = RegisteredCommand::new(created.id, descriptor.name().clone(), scope);
        if let Err(err) = self.registry.save(&registered).await {
            error!(
                %scope,
                command = %descriptor.name(),
                remote_id = %created.id,
                error = %err,
                "failed to record created command, withdrawing it"
            );
            if let Err(withdraw_err) = self.call(self.gateway.delete(scope, created.id)).await {
                error!(%scope, remote_id = %created.id, error = %withdraw_err, "failed to withdraw command");
            }
            return CommandOutcome::failed(None);
        }

        info!(%scope, command = %descriptor.name(), remote_id = %created.id, "created command");
        CommandOutcome::new(created.id, CommandChange::Created)
    }

    async fn refresh(
        &self,
        scope: CommandScope,
        remote_id: RemoteCommandId,
        descriptor: &CommandDescriptor,
    ) -> CommandOutcome {
        let remote = match self.call(self.gateway.fetch(scope, remote_id)).await {
            Ok(remote) => remote,
            Err(CommandGatewayError::UnknownCommand { .. }) => {
                warn!(
                    %scope,
                    command = %descriptor.name(),
                    %remote_id,
                    "registered command is unknown to the gateway, dropping stale row"
                );
                self.forget(scope, remote_id).await;
                return CommandOutcome::failed(None);
            }
            Err(err) => {
                warn!(%scope, command = %descriptor.name(), %remote_id, error = %err, "failed to fetch command");
                return CommandOutcome::failed(Some(remote_id));
            }
        };
        debug!(%scope, command = %descriptor.name(), %remote_id, "fetched command");

        if remote.matches(descriptor) {
            return CommandOutcome::new(remote_id, CommandChange::Unchanged);
        }

        match self.call(self.gateway.modify(scope, remote_id, descriptor)).await {
            Ok(()) => {
                debug!(%scope, command = %descriptor.name(), %remote_id, "updated command");
                CommandOutcome::new(remote_id, CommandChange::Updated)
            }
            Err(err) => {
                error!(%scope, command = %descriptor.name(), %remote_id, error = %err, "failed to update command");
                CommandOutcome::failed(Some(remote_id))
            }
        }
    }

    async fn remove_dangling(&self, scope: CommandScope, remote_id: RemoteCommandId) -> bool {
        match self.call(self.gateway.delete(scope, remote_id)).await {
            Ok(()) => debug!(%scope, %remote_id, "deleted command"),
            Err(CommandGatewayError::UnknownCommand { .. }) => {
                debug!(%scope, %remote_id, "dangling command was already gone");
            }
            Err(err) => {
                error!(%scope, %remote_id, error = %err, "failed to delete command");
                return false;
            }
        }
        self.forget(scope, remote_id).await
    }

    async fn forget(&self, scope: CommandScope, remote_id: RemoteCommandId) -> bool {
        match self.registry.remove_by_id(scope, remote_id).await {
            Ok(()) | Err(CommandRegistryError::NotFound { .. }) => true,
            Err(err) => {
                error!(%scope, %remote_id, error = %err, "failed to remove registry row");
                false
            }
        }
    }

    async fn call<T>(
        &self,
        request: impl Future<Output = CommandGatewayResult<T>> + Send,
    ) -> CommandGatewayResult<T> {
        tokio::time::timeout(self.call_timeout, request)
            .await
            .unwrap_or(Err(CommandGatewayError::TimedOut(self.call_timeout)))
    }
}
