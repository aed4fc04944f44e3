//! Error types for command declaration and interaction parsing.

use thiserror::Error;

use super::OptionType;

/// Errors returned while constructing command declarations.
///
/// Every variant is fatal at start-up: a bot with an invalid declaration must
/// not connect to the gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandDomainError {
    /// The name does not match `^[\w-]{1,32}$`.
    #[error("name '{0}' must match ^[\\w-]{{1,32}}$")]
    InvalidName(String),

    /// A description, choice name or choice value is outside 1..=100 characters.
    #[error("{subject} must contain between 1 and 100 characters, got {length}")]
    InvalidLength {
        /// What was being validated (for example `description of 'info'`).
        subject: String,
        /// Character count of the rejected value.
        length: usize,
    },

    /// An option declares more than 25 choices.
    #[error("option '{option}' declares {count} choices, at most 25 are allowed")]
    TooManyChoices {
        /// Option name.
        option: String,
        /// Number of declared choices.
        count: usize,
    },

    /// Choices were attached to an option type that cannot carry them.
    #[error("option '{option}' of type {option_type} cannot declare choices")]
    ChoicesNotSupported {
        /// Option name.
        option: String,
        /// Declared option type.
        option_type: OptionType,
    },

    /// An integer option declares a choice whose value is not a 32-bit integer.
    #[error("choice value '{value}' of integer option '{option}' is not a 32-bit integer")]
    InvalidIntegerChoice {
        /// Option name.
        option: String,
        /// Rejected choice value.
        value: String,
    },

    /// Two options of one command share a name.
    #[error("command '{command}' declares option '{option}' more than once")]
    DuplicateOption {
        /// Command name.
        command: String,
        /// Duplicated option name.
        option: String,
    },
}

/// Errors raised while reading options out of an inbound interaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InteractionError {
    /// The option is missing from the interaction.
    #[error("option '{0}' does not exist")]
    MissingOption(String),

    /// The option carries a value of another type than requested.
    #[error("option '{option}' is not applicable as {expected}")]
    OptionTypeMismatch {
        /// Option name.
        option: String,
        /// Requested option type.
        expected: OptionType,
    },

    /// The option value is not one of the declared choices.
    #[error("option '{option}' has unknown value '{value}'")]
    UnknownChoice {
        /// Option name.
        option: String,
        /// Received value.
        value: String,
    },
}
