//! Shared world state for command synchronization BDD scenarios.

use std::sync::Arc;

use landau::bot::commands::{ConnectCommand, InfoCommand};
use landau::bot::performance::SystemMonitor;
use landau::command::{
    adapters::memory::{GatewayCall, InMemoryCommandGateway, InMemoryCommandRegistry},
    domain::{CommandDescriptor, CommandName, CommandScope, CommandsConfig},
    ports::CommandRegistryRepository,
    services::{CommandSynchronizer, ScopeReport},
};
use landau::connect::adapters::memory::InMemoryConnectionRepository;
use mockable::DefaultClock;
use rstest::fixture;

/// Scenario world for command synchronization behaviour tests.
pub struct SyncWorld {
    /// Registry store under test.
    pub registry: Arc<InMemoryCommandRegistry>,
    /// Recording gateway.
    pub gateway: Arc<InMemoryCommandGateway>,
    /// Per-scope toggles used by the next reconciliation.
    pub config: CommandsConfig,
    /// Declared commands.
    pub declared: Vec<CommandDescriptor>,
    /// Gateway calls recorded before the last reconciliation started.
    pub calls_before: usize,
    /// Report of the last reconciliation.
    pub last_report: Option<ScopeReport>,
}

impl SyncWorld {
    /// Creates a world with empty stores and default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(InMemoryCommandRegistry::new()),
            gateway: Arc::new(InMemoryCommandGateway::new()),
            config: CommandsConfig::new(),
            declared: Vec::new(),
            calls_before: 0,
            last_report: None,
        }
    }

    /// Declares the bot's real `/info` and `/connect` commands.
    pub fn declare_bot_commands(&mut self) -> Result<(), eyre::Report> {
        self.declared = vec![
            InfoCommand::<SystemMonitor>::descriptor()?,
            ConnectCommand::<InMemoryConnectionRepository, DefaultClock>::descriptor()?,
        ];
        Ok(())
    }

    /// Reconciles one scope with the current configuration.
    pub fn reconcile(&mut self, scope: CommandScope) -> Result<(), eyre::Report> {
        self.calls_before = self.gateway.calls()?.len();
        let synchronizer = CommandSynchronizer::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.gateway),
            Arc::new(self.config.clone()),
        );
        self.last_report = Some(run_async(synchronizer.reconcile(scope, &self.declared)));
        Ok(())
    }

    /// Returns the gateway calls made by the last reconciliation.
    pub fn last_calls(&self) -> Result<Vec<GatewayCall>, eyre::Report> {
        Ok(self
            .gateway
            .calls()?
            .into_iter()
            .skip(self.calls_before)
            .collect())
    }

    /// Returns whether the registry holds `name` in `scope`.
    pub fn is_registered(&self, scope: CommandScope, name: &str) -> Result<bool, eyre::Report> {
        let command_name = CommandName::new(name)?;
        Ok(run_async(self.registry.exists_by_name(scope, &command_name))?)
    }
}

impl Default for SyncWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SyncWorld {
    SyncWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
