//! Configuration error type.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration file or directory could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that failed.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// File that failed.
        path: Utf8PathBuf,
        /// Underlying TOML error.
        source: Box<toml::de::Error>,
    },

    /// The merged files do not match the configuration schema.
    #[error("configuration does not match the schema: {0}")]
    Schema(#[source] Box<toml::de::Error>),

    /// A `-D` argument is not of the form `key=value`.
    #[error("expected key=value, got '{0}'")]
    InvalidDefine(String),

    /// An override names a key that cannot be set.
    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    /// An override value does not fit its key.
    #[error("invalid value '{value}' for '{key}'")]
    InvalidValue {
        /// Dotted key.
        key: String,
        /// Rejected value.
        value: String,
    },

    /// A guild table is keyed by something other than a non-zero id.
    #[error("guild id '{0}' must be a non-zero integer")]
    InvalidGuildId(String),
}
