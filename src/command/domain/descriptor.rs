//! Command declarations: descriptors, options and choices.
//!
//! Every constructor validates its input so that an invalid declaration fails
//! as soon as it is built, long before the bot talks to the gateway.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CommandDomainError, CommandName};

/// Maximum number of characters of descriptions, choice names and values.
const MAX_TEXT_LENGTH: usize = 100;

/// Maximum number of choices on one option.
const MAX_CHOICES: usize = 25;

/// Value type of a command option.
///
/// Sub-commands and sub-command groups are deliberately not modelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    /// Free-form string.
    String,
    /// Integer.
    Integer,
    /// Boolean.
    Boolean,
    /// Platform user.
    User,
    /// Platform channel.
    Channel,
    /// Platform role.
    Role,
    /// User or role.
    Mentionable,
}

impl OptionType {
    /// Returns the numeric code the gateway uses for this type.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::String => 3,
            Self::Integer => 4,
            Self::Boolean => 5,
            Self::User => 6,
            Self::Channel => 7,
            Self::Role => 8,
            Self::Mentionable => 9,
        }
    }

    /// Looks up an option type by gateway code.
    ///
    /// Returns `None` for codes this crate does not model.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            3 => Some(Self::String),
            4 => Some(Self::Integer),
            5 => Some(Self::Boolean),
            6 => Some(Self::User),
            7 => Some(Self::Channel),
            8 => Some(Self::Role),
            9 => Some(Self::Mentionable),
            _ => None,
        }
    }

    /// Returns whether options of this type may declare choices.
    #[must_use]
    pub const fn supports_choices(self) -> bool {
        matches!(self, Self::String | Self::Integer)
    }

    /// Returns the lowercase type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::User => "user",
            Self::Channel => "channel",
            Self::Role => "role",
            Self::Mentionable => "mentionable",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A predefined value users can pick for an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionChoice {
    name: String,
    value: String,
}

impl OptionChoice {
    /// Creates a choice.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError::InvalidLength`] when the name or value is
    /// outside 1..=100 characters.
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, CommandDomainError> {
        Ok(Self {
            name: bounded_text("choice name", name.into())?,
            value: bounded_text("choice value", value.into())?,
        })
    }

    /// Returns the displayed choice name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value delivered with the interaction.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A typed option of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOption {
    option_type: OptionType,
    name: CommandName,
    description: String,
    required: bool,
    choices: Vec<OptionChoice>,
}

impl CommandOption {
    /// Creates an optional option without choices.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError`] when the name or description is invalid.
    pub fn new(
        option_type: OptionType,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, CommandDomainError> {
        let option_name = CommandName::new(name)?;
        let validated_description = bounded_text(
            &format!("description of option '{option_name}'"),
            description.into(),
        )?;
        Ok(Self {
            option_type,
            name: option_name,
            description: validated_description,
            required: false,
            choices: Vec::new(),
        })
    }

    /// Marks the option as required or optional.
    #[must_use]
    pub const fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Appends a choice.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError::ChoicesNotSupported`] for option types
    /// other than string and integer,
    /// [`CommandDomainError::InvalidIntegerChoice`] when an integer option
    /// receives a value that is not a 32-bit integer, and
    /// [`CommandDomainError::TooManyChoices`] past 25 choices.
    pub fn with_choice(mut self, choice: OptionChoice) -> Result<Self, CommandDomainError> {
        if !self.option_type.supports_choices() {
            return Err(CommandDomainError::ChoicesNotSupported {
                option: self.name.to_string(),
                option_type: self.option_type,
            });
        }
        let accepted = if self.option_type == OptionType::Integer {
            self.canonical_integer(choice)?
        } else {
            choice
        };
        if self.choices.len() >= MAX_CHOICES {
            return Err(CommandDomainError::TooManyChoices {
                option: self.name.to_string(),
                count: self.choices.len() + 1,
            });
        }
        self.choices.push(accepted);
        Ok(self)
    }

    /// Integer choices travel as 32-bit values and are stored in canonical
    /// decimal form so `01` and `1` compare equal to the remote copy.
    fn canonical_integer(&self, choice: OptionChoice) -> Result<OptionChoice, CommandDomainError> {
        match choice.value.trim().parse::<i32>() {
            Ok(parsed) => Ok(OptionChoice {
                name: choice.name,
                value: parsed.to_string(),
            }),
            Err(_) => Err(CommandDomainError::InvalidIntegerChoice {
                option: self.name.to_string(),
                value: choice.value,
            }),
        }
    }

    /// Appends several choices, validating each.
    ///
    /// # Errors
    ///
    /// Returns the first error [`Self::with_choice`] reports.
    pub fn with_choices(
        self,
        choices: impl IntoIterator<Item = OptionChoice>,
    ) -> Result<Self, CommandDomainError> {
        choices
            .into_iter()
            .try_fold(self, |option, choice| option.with_choice(choice))
    }

    /// Returns the option type.
    #[must_use]
    pub const fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Returns the option name.
    #[must_use]
    pub const fn name(&self) -> &CommandName {
        &self.name
    }

    /// Returns the option description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns whether the option must be supplied.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Returns the declared choices in order.
    #[must_use]
    pub fn choices(&self) -> &[OptionChoice] {
        &self.choices
    }
}

/// Immutable declaration of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    name: CommandName,
    description: String,
    options: Vec<CommandOption>,
}

impl CommandDescriptor {
    /// Creates a descriptor without options.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError::InvalidName`] or
    /// [`CommandDomainError::InvalidLength`] when validation fails.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, CommandDomainError> {
        let command_name = CommandName::new(name)?;
        let validated_description =
            bounded_text(&format!("description of '{command_name}'"), description.into())?;
        Ok(Self {
            name: command_name,
            description: validated_description,
            options: Vec::new(),
        })
    }

    /// Appends an option.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError::DuplicateOption`] when an option with the
    /// same name already exists.
    pub fn with_option(mut self, option: CommandOption) -> Result<Self, CommandDomainError> {
        if self
            .options
            .iter()
            .any(|existing| existing.name == option.name)
        {
            return Err(CommandDomainError::DuplicateOption {
                command: self.name.to_string(),
                option: option.name.to_string(),
            });
        }
        self.options.push(option);
        Ok(self)
    }

    /// Returns the command name.
    #[must_use]
    pub const fn name(&self) -> &CommandName {
        &self.name
    }

    /// Returns the command description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the options in declaration order.
    #[must_use]
    pub fn options(&self) -> &[CommandOption] {
        &self.options
    }
}

fn bounded_text(subject: &str, value: String) -> Result<String, CommandDomainError> {
    let length = value.chars().count();
    if (1..=MAX_TEXT_LENGTH).contains(&length) {
        Ok(value)
    } else {
        Err(CommandDomainError::InvalidLength {
            subject: subject.to_owned(),
            length,
        })
    }
}
