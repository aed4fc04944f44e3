//! Application services for command synchronization and dispatch.

mod catalog;
mod dispatcher;
mod report;
mod synchronizer;

pub use catalog::{CatalogError, CommandCatalog, DeclaredCommand};
pub use dispatcher::{DispatchError, DispatcherBuilder, InteractionDispatcher};
pub use report::{CommandChange, CommandOutcome, ScopeReport, SyncReport};
pub use synchronizer::{CommandSynchronizer, DEFAULT_CALL_TIMEOUT};
