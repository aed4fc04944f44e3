//! The chat-facing side of the bot.
//!
//! - `commands`: the `/info` and `/connect` command bodies and the catalog
//!   declaring them.
//! - `performance`: memory and CPU figures for `/info bot`.
//! - `render`: reply templates and platform literals.
//! - `event_handler`: the serenity event handler feeding the dispatcher.

pub mod commands;
pub mod performance;
pub mod render;

mod event_handler;

pub use event_handler::LandauHandler;
