//! Shared world state for connect BDD scenarios.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use landau::bot::{commands::ConnectCommand, render::ReplyTemplates};
use landau::command::domain::InteractionReply;
use landau::connect::{
    adapters::memory::InMemoryConnectionRepository,
    domain::{Service, ServiceIdentifier},
    ports::{IdentifierValidationError, IdentifierValidator},
    services::ConnectService,
};
use mockable::DefaultClock;
use rstest::fixture;

/// Validator that knows a mutable set of accounts and counts lookups.
#[derive(Debug, Default)]
pub struct CountingValidator {
    known: RwLock<HashSet<String>>,
    calls: AtomicUsize,
}

impl CountingValidator {
    /// Registers an existing account.
    pub fn add(&self, identifier: &str) -> Result<(), eyre::Report> {
        self.known
            .write()
            .map_err(|err| eyre::eyre!("validator lock poisoned: {err}"))?
            .insert(identifier.to_owned());
        Ok(())
    }

    /// Returns the number of lookups so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentifierValidator for CountingValidator {
    async fn is_valid_identifier(
        &self,
        identifier: &ServiceIdentifier,
    ) -> Result<bool, IdentifierValidationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let known = self
            .known
            .read()
            .map_err(|err| IdentifierValidationError::transport(std::io::Error::other(err.to_string())))?;
        Ok(known.contains(identifier.as_str()))
    }
}

/// Handler type exercised by the scenarios.
pub type TestConnectCommand = ConnectCommand<InMemoryConnectionRepository, DefaultClock>;

/// Scenario world for connect behaviour tests.
pub struct ConnectWorld {
    /// Connection store.
    pub repository: Arc<InMemoryConnectionRepository>,
    /// External account lookup.
    pub validator: Arc<CountingValidator>,
    /// `/connect` handler under test.
    pub command: TestConnectCommand,
    /// Reply to the last interaction.
    pub last_reply: Option<InteractionReply>,
}

impl ConnectWorld {
    /// Creates a world with no accounts and no connections.
    pub fn new() -> Result<Self, eyre::Report> {
        let repository = Arc::new(InMemoryConnectionRepository::new());
        let validator = Arc::new(CountingValidator::default());
        let service = ConnectService::new(Arc::clone(&repository), Arc::new(DefaultClock))
            .with_validator(Service::Codewars, Arc::clone(&validator) as Arc<dyn IdentifierValidator>);
        let command = ConnectCommand::new(Arc::new(service), Arc::new(ReplyTemplates::new()?));
        Ok(Self {
            repository,
            validator,
            command,
            last_reply: None,
        })
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ConnectWorld {
    ConnectWorld::new().expect("connect world should build")
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
