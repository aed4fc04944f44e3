//! Layered runtime configuration.
//!
//! Values are read, lowest precedence first, from `landau.toml`, the
//! selected profile file `landau-<profile>.toml`, `LANDAU_*` environment
//! variables, and finally `-D key=value` overrides. Both files are optional
//! and live in the configuration directory (`LANDAU_CONFIG_DIR`, default
//! `config`).

mod error;
mod settings;


pub use error::ConfigError;
pub use settings::{BotSettings, CommandsSection, DatabaseSettings, LandauConfig, ToggleSection};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use toml::{Table, Value};

/// Environment variable selecting the configuration directory.
pub const CONFIG_DIR_ENV: &str = "LANDAU_CONFIG_DIR";

const DEFAULT_CONFIG_DIR: &str = "config";
const BASE_FILE: &str = "landau.toml";

/// Environment variables and the dotted keys they set.
const ENV_KEYS: [(&str, &str); 4] = [
    ("LANDAU_DATABASE_URL", "database.url"),
    ("LANDAU_DATABASE_USERNAME", "database.username"),
    ("LANDAU_DATABASE_PASSWORD", "database.password"),
    ("LANDAU_GATEWAY_TIMEOUT_SECS", "bot.gateway_timeout_secs"),
];

/// Builds a [`LandauConfig`] from files, environment and overrides.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    directory: Utf8PathBuf,
    profile: Option<String>,
    environment: BTreeMap<String, String>,
    overrides: Vec<(String, String)>,
}

impl ConfigLoader {
    /// Creates a loader reading files from `directory`.
    #[must_use]
    pub fn new(directory: impl Into<Utf8PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            profile: None,
            environment: BTreeMap::new(),
            overrides: Vec::new(),
        }
    }

    /// Creates a loader for the process: the directory comes from
    /// `LANDAU_CONFIG_DIR` and the `LANDAU_*` variables are captured.
    #[must_use]
    pub fn from_process_env() -> Self {
        let directory =
            std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_owned());
        Self::new(directory).with_environment(std::env::vars())
    }

    /// Selects the profile file layered over the base file.
    #[must_use]
    pub fn with_profile(mut self, profile: Option<String>) -> Self {
        self.profile = profile.filter(|name| !name.trim().is_empty());
        self
    }

    /// Supplies environment variables; only known `LANDAU_*` names are used.
    #[must_use]
    pub fn with_environment<I, K, V>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.environment = variables
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .filter(|(key, _)| ENV_KEYS.iter().any(|(name, _)| *name == key.as_str()))
            .collect();
        self
    }

    /// Adds a `key=value` override with the highest precedence.
    #[must_use]
    pub fn with_override(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// Reads and merges every layer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a file cannot be read or parsed, an
    /// override names an unknown key, a value has the wrong shape, a bound
    /// is zero after merging or the command tables name an invalid guild.
    pub fn load(&self) -> Result<LandauConfig, ConfigError> {
        let mut merged = Table::new();
        if let Some(directory) = self.open_directory()? {
            for file in self.files() {
                if let Some(layer) = read_layer(&directory, &self.directory, &file)? {
                    merge(&mut merged, layer);
                }
            }
        }
        let mut config = Value::Table(merged)
            .try_into::<LandauConfig>()
            .map_err(|err| ConfigError::Schema(Box::new(err)))?;

        for (variable, key) in ENV_KEYS {
            if let Some(value) = self.environment.get(variable) {
                config.set(key, value)?;
            }
        }
        for (key, value) in &self.overrides {
            config.set(key, value)?;
        }

        config.validate()?;
        config.commands_config()?;
        Ok(config)
    }

    fn files(&self) -> Vec<String> {
        let mut files = vec![BASE_FILE.to_owned()];
        if let Some(profile) = &self.profile {
            files.push(format!("landau-{profile}.toml"));
        }
        files
    }

    fn open_directory(&self) -> Result<Option<Dir>, ConfigError> {
        match Dir::open_ambient_dir(&self.directory, ambient_authority()) {
            Ok(directory) => Ok(Some(directory)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ConfigError::Read {
                path: self.directory.clone(),
                source: err,
            }),
        }
    }
}

/// Splits a `-D key=value` argument.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDefine`] when there is no `=` or the key is
/// empty.
pub fn parse_define(raw: &str) -> Result<(String, String), ConfigError> {
    raw.split_once('=')
        .filter(|(key, _)| !key.trim().is_empty())
        .map(|(key, value)| (key.trim().to_owned(), value.to_owned()))
        .ok_or_else(|| ConfigError::InvalidDefine(raw.to_owned()))
}

fn read_layer(directory: &Dir, root: &Utf8Path, file: &str) -> Result<Option<Table>, ConfigError> {
    let path = root.join(file);
    match directory.read_to_string(file) {
        Ok(contents) => toml::from_str::<Table>(&contents)
            .map(Some)
            .map_err(|err| ConfigError::Parse {
                path,
                source: Box::new(err),
            }),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(ConfigError::Read { path, source: err }),
    }
}

fn merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        let merged = match (base.remove(&key), value) {
            (Some(Value::Table(mut existing)), Value::Table(incoming)) => {
                merge(&mut existing, incoming);
                Value::Table(existing)
            }
            (_, incoming) => incoming,
        };
        base.insert(key, merged);
    }
}
