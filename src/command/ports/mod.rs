//! Port contracts for command registration and interaction handling.
//!
//! Ports define infrastructure-agnostic interfaces used by the command
//! services.

pub mod gateway;
pub mod handler;
pub mod registry;

pub use gateway::{CommandGateway, CommandGatewayError, CommandGatewayResult, CreatedCommand};
pub use handler::{CommandHandler, CommandHandlerError};
pub use registry::{CommandRegistryError, CommandRegistryRepository, CommandRegistryResult};

#[cfg(test)]
pub use handler::MockCommandHandler;
