//! Platform-neutral view of an inbound command interaction and its reply.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

use super::{GuildId, InteractionError, OptionType, RemoteCommandId};

/// Value of an option supplied with an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// String value.
    String(String),
    /// Integer value.
    Integer(i64),
    /// Boolean value.
    Boolean(bool),
    /// User identifier.
    User(u64),
    /// Channel identifier.
    Channel(u64),
    /// Role identifier.
    Role(u64),
}

/// Snapshot of the guild an interaction was issued in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSummary {
    /// Guild identifier.
    pub id: GuildId,
    /// Guild name.
    pub name: String,
    /// Owner user identifier.
    pub owner_id: u64,
    /// Approximate member count.
    pub member_count: u64,
    /// Server boost level.
    pub premium_tier: u8,
    /// Number of server boosts.
    pub premium_subscription_count: u64,
    /// When the bot joined the guild.
    pub joined_at: Option<DateTime<Utc>>,
}

/// An invocation of a registered command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInteraction {
    command_id: RemoteCommandId,
    command_name: String,
    user_id: u64,
    guild: Option<GuildSummary>,
    options: BTreeMap<String, OptionValue>,
}

impl CommandInteraction {
    /// Creates an interaction without options or guild context.
    #[must_use]
    pub fn new(command_id: RemoteCommandId, command_name: impl Into<String>, user_id: u64) -> Self {
        Self {
            command_id,
            command_name: command_name.into(),
            user_id,
            guild: None,
            options: BTreeMap::new(),
        }
    }

    /// Attaches the guild the interaction was issued in.
    #[must_use]
    pub fn with_guild(mut self, guild: GuildSummary) -> Self {
        self.guild = Some(guild);
        self
    }

    /// Adds an option value.
    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: OptionValue) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    /// Returns the remote identifier of the invoked command.
    #[must_use]
    pub const fn command_id(&self) -> RemoteCommandId {
        self.command_id
    }

    /// Returns the invoked command name.
    #[must_use]
    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    /// Returns the invoking user.
    #[must_use]
    pub const fn user_id(&self) -> u64 {
        self.user_id
    }

    /// Returns the guild context, if any.
    #[must_use]
    pub const fn guild(&self) -> Option<&GuildSummary> {
        self.guild.as_ref()
    }

    /// Returns a string option.
    ///
    /// # Errors
    ///
    /// Returns [`InteractionError::MissingOption`] when absent or
    /// [`InteractionError::OptionTypeMismatch`] when the value is not a
    /// string.
    pub fn string_option(&self, name: &str) -> Result<&str, InteractionError> {
        match self.options.get(name) {
            Some(OptionValue::String(value)) => Ok(value),
            Some(_) => Err(InteractionError::OptionTypeMismatch {
                option: name.to_owned(),
                expected: OptionType::String,
            }),
            None => Err(InteractionError::MissingOption(name.to_owned())),
        }
    }
}

/// A named field of an embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    /// Field title.
    pub name: String,
    /// Field body.
    pub value: String,
    /// Whether the field may share a row with its neighbours.
    pub inline: bool,
}

/// Rich reply content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyEmbed {
    /// Embed title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional author line and icon.
    pub author: Option<(String, String)>,
    /// Accent colour as `0xRRGGBB`.
    pub colour: u32,
    /// Ordered fields.
    pub fields: Vec<EmbedField>,
}

impl ReplyEmbed {
    /// Creates an embed with a title.
    #[must_use]
    pub fn new(title: impl Into<String>, colour: u32) -> Self {
        Self {
            title: title.into(),
            colour,
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the author name and icon URL.
    #[must_use]
    pub fn with_author(mut self, name: impl Into<String>, icon_url: impl Into<String>) -> Self {
        self.author = Some((name.into(), icon_url.into()));
        self
    }

    /// Appends an inline field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: true,
        });
        self
    }
}

/// Reply sent back for an interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionReply {
    content: Option<String>,
    embed: Option<ReplyEmbed>,
    ephemeral: bool,
}

impl InteractionReply {
    /// Creates a plain text reply.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Creates an embed reply.
    #[must_use]
    pub fn embed(embed: ReplyEmbed) -> Self {
        Self {
            embed: Some(embed),
            ..Self::default()
        }
    }

    /// Restricts visibility to the invoking user.
    #[must_use]
    pub const fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    /// Returns the text content.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Returns the embed.
    #[must_use]
    pub const fn embed_content(&self) -> Option<&ReplyEmbed> {
        self.embed.as_ref()
    }

    /// Returns whether only the invoking user sees the reply.
    #[must_use]
    pub const fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }
}
