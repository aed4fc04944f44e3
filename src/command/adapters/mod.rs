//! Adapter implementations for the command ports.

pub mod memory;
pub mod postgres;

mod discord;

pub use discord::DiscordCommandGateway;
