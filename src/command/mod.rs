//! Application commands: declaration, synchronization and dispatch.
//!
//! Commands are declared in code, reconciled against the remote gateway for
//! the global scope and every guild scope, and routed by remote identifier
//! once synchronization has finished. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
