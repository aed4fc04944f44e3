//! External services a user can connect to.

use super::ParseServiceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// External service a user can link an account of.
///
/// Adding a service means adding a variant here and one validator entry where
/// the connect service is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    /// Codewars kata platform.
    Codewars,
}

impl Service {
    /// Every supported service, in presentation order.
    pub const ALL: [Self; 1] = [Self::Codewars];

    /// Returns the display name offered as a command choice.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Codewars => "CodeWars",
        }
    }

    /// Returns the value delivered when the service is chosen.
    #[must_use]
    pub const fn choice_value(self) -> &'static str {
        match self {
            Self::Codewars => "CODEWARS",
        }
    }

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Codewars => "codewars",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl TryFrom<&str> for Service {
    type Error = ParseServiceError;

    /// Parses a choice value, storage value or display name, ignoring case.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|service| {
                normalized.eq_ignore_ascii_case(service.choice_value())
                    || normalized.eq_ignore_ascii_case(service.key())
            })
            .ok_or_else(|| ParseServiceError(value.to_owned()))
    }
}
