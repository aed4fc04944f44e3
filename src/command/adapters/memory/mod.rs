//! In-memory adapters for the command ports.

mod gateway;
mod registry;

pub use gateway::{GatewayCall, InMemoryCommandGateway};
pub use registry::InMemoryCommandRegistry;
