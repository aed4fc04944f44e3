//! Validated command and option name type.

use super::CommandDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a command or option name.
const MAX_NAME_LENGTH: usize = 32;

/// Name of a command or option, matching `^[\w-]{1,32}$`.
///
/// `\w` is interpreted as ASCII word characters (`[A-Za-z0-9_]`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommandName(String);

impl CommandName {
    /// Creates a validated name.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError::InvalidName`] when the value is empty,
    /// longer than 32 characters, or contains characters outside
    /// `[A-Za-z0-9_-]`.
    pub fn new(value: impl Into<String>) -> Result<Self, CommandDomainError> {
        let raw = value.into();
        let is_valid = !raw.is_empty()
            && raw.len() <= MAX_NAME_LENGTH
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

        if is_valid {
            Ok(Self(raw))
        } else {
            Err(CommandDomainError::InvalidName(raw))
        }
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CommandName {
    type Error = CommandDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CommandName> for String {
    fn from(value: CommandName) -> Self {
        value.0
    }
}

impl AsRef<str> for CommandName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
