//! Typed configuration tree.

use reqwest::Url;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use super::ConfigError;
use crate::command::domain::{CommandsConfig, GuildId};

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandauConfig {
    /// Bot behaviour.
    pub bot: BotSettings,
    /// Database connection.
    pub database: DatabaseSettings,
}

/// `[bot]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BotSettings {
    /// Upper bound for a single gateway call, in seconds.
    pub gateway_timeout_secs: u64,
    /// Per-scope command toggles.
    pub commands: CommandsSection,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            gateway_timeout_secs: 10,
            commands: CommandsSection::default(),
        }
    }
}

impl BotSettings {
    /// Returns the per-call gateway timeout.
    #[must_use]
    pub const fn gateway_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway_timeout_secs)
    }
}

/// `[bot.commands]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandsSection {
    /// Global toggles keyed by command name.
    pub global: BTreeMap<String, ToggleSection>,
    /// Guild toggles keyed by guild id, then command name.
    pub guilds: BTreeMap<String, BTreeMap<String, ToggleSection>>,
}

/// `{ enabled = .. }` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToggleSection {
    /// Whether the command is active; an entry without the flag enables it.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

const fn enabled_by_default() -> bool {
    true
}

/// `[database]` table.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL.
    pub url: String,
    /// User name, replacing any in the URL.
    pub username: Option<String>,
    /// Password, replacing any in the URL.
    pub password: Option<String>,
    /// Upper bound for pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "postgres://localhost:5432/landau".to_owned(),
            username: None,
            password: None,
            max_connections: 4,
        }
    }
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DatabaseSettings {
    /// Returns the URL with the configured credentials applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the URL does not parse or
    /// cannot carry credentials.
    pub fn connection_url(&self) -> Result<String, ConfigError> {
        let invalid = |key: &str, value: &str| ConfigError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
        };
        let mut url = Url::parse(&self.url).map_err(|_| invalid("database.url", &self.url))?;
        if let Some(username) = &self.username {
            url.set_username(username)
                .map_err(|()| invalid("database.username", username))?;
        }
        if let Some(password) = &self.password {
            url.set_password(Some(password))
                .map_err(|()| invalid("database.password", "<redacted>"))?;
        }
        Ok(String::from(url))
    }
}

impl LandauConfig {
    /// Sets a value by dotted key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownKey`] for keys outside the supported set
    /// and [`ConfigError::InvalidValue`] for unparsable numbers.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "database.url" => self.database.url = value.to_owned(),
            "database.username" => self.database.username = Some(value.to_owned()),
            "database.password" => self.database.password = Some(value.to_owned()),
            "database.max_connections" => {
                self.database.max_connections = parse_positive(key, value)?;
            }
            "bot.gateway_timeout_secs" => {
                self.bot.gateway_timeout_secs = parse_positive(key, value)?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_owned())),
        }
        Ok(())
    }

    /// Checks bounds that every layer must respect.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the gateway timeout or the
    /// pool size is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bot.gateway_timeout_secs == 0 {
            return Err(zero_value("bot.gateway_timeout_secs"));
        }
        if self.database.max_connections == 0 {
            return Err(zero_value("database.max_connections"));
        }
        Ok(())
    }

    /// Converts the command tables into the domain configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidGuildId`] when a guild key is not a
    /// non-zero integer.
    pub fn commands_config(&self) -> Result<CommandsConfig, ConfigError> {
        let with_global = self
            .bot
            .commands
            .global
            .iter()
            .fold(CommandsConfig::new(), |config, (name, toggle)| {
                config.with_global(name.as_str(), toggle.enabled)
            });
        self.bot
            .commands
            .guilds
            .iter()
            .try_fold(with_global, |config, (raw_id, commands)| {
                let guild_id = parse_guild_id(raw_id)?;
                Ok(commands.iter().fold(
                    config.with_empty_guild(guild_id),
                    |guild_config, (name, toggle)| {
                        guild_config.with_guild(guild_id, name.as_str(), toggle.enabled)
                    },
                ))
            })
    }
}

fn zero_value(key: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_owned(),
        value: "0".to_owned(),
    }
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    value
        .trim()
        .parse::<T>()
        .ok()
        .filter(|parsed| *parsed > T::default())
        .ok_or_else(|| ConfigError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
        })
}

fn parse_guild_id(raw: &str) -> Result<GuildId, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(GuildId::new)
        .ok_or_else(|| ConfigError::InvalidGuildId(raw.to_owned()))
}
