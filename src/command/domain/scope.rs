//! Registration scopes.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::GuildId;

/// Namespace a command is registered in.
///
/// Global and guild scopes never share rows: the same command name may be
/// registered once globally and once per guild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "guild_id")]
pub enum CommandScope {
    /// Visible in every guild and in direct messages.
    Global,
    /// Visible in one guild only.
    Guild(GuildId),
}

impl CommandScope {
    /// Returns the guild for guild scopes.
    #[must_use]
    pub const fn guild_id(self) -> Option<GuildId> {
        match self {
            Self::Global => None,
            Self::Guild(guild_id) => Some(guild_id),
        }
    }
}

impl fmt::Display for CommandScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Guild(guild_id) => write!(f, "guild {guild_id}"),
        }
    }
}
