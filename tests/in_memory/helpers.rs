//! Shared builders for in-memory integration tests.

use std::sync::Arc;

use landau::bot::{
    commands::{self, BotIdentity, ConnectCommand, InfoCommand},
    performance::{PerformanceMonitor, PerformanceSnapshot},
    render::ReplyTemplates,
};
use landau::command::{
    adapters::memory::{InMemoryCommandGateway, InMemoryCommandRegistry},
    domain::{CommandInteraction, CommandName, CommandsConfig, OptionValue, RemoteCommandId},
    services::{CommandCatalog, CommandSynchronizer, InteractionDispatcher, SyncReport},
};
use landau::connect::{
    adapters::memory::{InMemoryConnectionRepository, StaticIdentifierValidator},
    domain::Service,
    services::ConnectService,
};
use mockable::DefaultClock;

/// Monitor reporting fixed figures.
pub struct FixedMonitor;

impl PerformanceMonitor for FixedMonitor {
    fn snapshot(&self) -> PerformanceSnapshot {
        PerformanceSnapshot {
            used_memory: 64_000_000,
            total_memory: 512_000_000,
            cpu_usage: 1.25,
            processors: 2,
        }
    }
}

/// In-memory wiring of the whole bot.
pub struct BotHarness {
    /// Registry store.
    pub registry: Arc<InMemoryCommandRegistry>,
    /// Recording gateway.
    pub gateway: Arc<InMemoryCommandGateway>,
    /// Declared commands with handlers.
    pub catalog: CommandCatalog,
    /// Connection store.
    pub connections: Arc<InMemoryConnectionRepository>,
}

impl BotHarness {
    /// Builds the bot with `known` Codewars accounts.
    pub fn new(known: &[&str]) -> Self {
        let templates = Arc::new(ReplyTemplates::new().expect("templates should compile"));
        let clock = Arc::new(DefaultClock);
        let connections = Arc::new(InMemoryConnectionRepository::new());
        let connect_service = ConnectService::new(Arc::clone(&connections), clock)
            .with_validator(
                Service::Codewars,
                Arc::new(StaticIdentifierValidator::new(known.iter().copied())),
            );
        let catalog = commands::catalog(
            InfoCommand::new(
                BotIdentity::new("Landau"),
                Arc::clone(&templates),
                Arc::new(FixedMonitor),
            ),
            ConnectCommand::new(Arc::new(connect_service), templates),
        )
        .expect("bot commands should declare");
        Self {
            registry: Arc::new(InMemoryCommandRegistry::new()),
            gateway: Arc::new(InMemoryCommandGateway::new()),
            catalog,
            connections,
        }
    }

    /// Synchronizes every declared command under `config`.
    pub async fn synchronize(&self, config: CommandsConfig) -> SyncReport {
        CommandSynchronizer::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.gateway),
            Arc::new(config),
        )
        .synchronize(&self.catalog.descriptors())
        .await
    }

    /// Builds the dispatcher for a synchronization report.
    pub fn dispatcher(&self, report: &SyncReport) -> InteractionDispatcher {
        InteractionDispatcher::from_report(&self.catalog, report)
    }
}

/// Builds a validated command name.
pub fn name(raw: &str) -> CommandName {
    CommandName::new(raw).expect("test command name should be valid")
}

/// Builds an interaction carrying string options.
pub fn interaction(
    id: RemoteCommandId,
    command: &str,
    user: u64,
    options: &[(&str, &str)],
) -> CommandInteraction {
    options.iter().fold(
        CommandInteraction::new(id, command, user),
        |built, (option, value)| built.with_option(*option, OptionValue::String((*value).to_owned())),
    )
}
