//! Per-scope enablement of declared commands.

use std::collections::BTreeMap;

use super::{CommandName, CommandScope, GuildId};

/// Enable switch for one command in one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandToggle {
    /// Whether the command is active in the scope.
    pub enabled: bool,
}

impl CommandToggle {
    /// Creates a toggle.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

/// Which declared commands are active in which scope.
///
/// A command missing from the global table is enabled globally. A command
/// missing from a guild table is disabled for that guild: guilds opt in
/// explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandsConfig {
    global: BTreeMap<String, CommandToggle>,
    guilds: BTreeMap<GuildId, BTreeMap<String, CommandToggle>>,
}

impl CommandsConfig {
    /// Creates a configuration with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the global toggle of a command.
    #[must_use]
    pub fn with_global(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.global.insert(name.into(), CommandToggle::new(enabled));
        self
    }

    /// Sets the toggle of a command in one guild.
    #[must_use]
    pub fn with_guild(mut self, guild_id: GuildId, name: impl Into<String>, enabled: bool) -> Self {
        self.guilds
            .entry(guild_id)
            .or_default()
            .insert(name.into(), CommandToggle::new(enabled));
        self
    }

    /// Registers a guild without enabling any command in it.
    #[must_use]
    pub fn with_empty_guild(mut self, guild_id: GuildId) -> Self {
        self.guilds.entry(guild_id).or_default();
        self
    }

    /// Returns whether the named command is active in `scope`.
    #[must_use]
    pub fn is_enabled(&self, scope: CommandScope, name: &CommandName) -> bool {
        match scope {
            CommandScope::Global => self
                .global
                .get(name.as_str())
                .is_none_or(|toggle| toggle.enabled),
            CommandScope::Guild(guild_id) => self
                .guilds
                .get(&guild_id)
                .and_then(|commands| commands.get(name.as_str()))
                .is_some_and(|toggle| toggle.enabled),
        }
    }

    /// Returns the configured guilds in ascending order.
    pub fn guild_ids(&self) -> impl Iterator<Item = GuildId> + '_ {
        self.guilds.keys().copied()
    }
}
