//! `/info` command: facts about the bot or the current server.

use async_trait::async_trait;
use minijinja::context;
use std::sync::Arc;

use crate::bot::performance::PerformanceMonitor;
use crate::bot::render::ReplyTemplates;
use crate::command::{
    domain::{
        CommandDescriptor, CommandDomainError, CommandInteraction, CommandOption, GuildSummary,
        InteractionError, InteractionReply, OptionChoice, OptionType, ReplyEmbed,
    },
    ports::{CommandHandler, CommandHandlerError},
};

/// Embed accent colour (sea green).
pub const SEA_GREEN: u32 = 0x2E_8B_57;

const SUBJECT_OPTION: &str = "subject";
const LIBRARY: &str = "[Serenity](https://github.com/serenity-rs/serenity)";
const LANGUAGE: &str = "Rust";

/// What `/info` reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoSubject {
    /// The bot itself.
    Bot,
    /// The server the command was issued in.
    Server,
}

impl InfoSubject {
    /// Every subject, in choice order.
    pub const ALL: [Self; 2] = [Self::Bot, Self::Server];

    /// Returns the choice name and value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bot => "bot",
            Self::Server => "server",
        }
    }
}

impl TryFrom<&str> for InfoSubject {
    type Error = InteractionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|subject| subject.as_str() == value)
            .ok_or_else(|| InteractionError::UnknownChoice {
                option: SUBJECT_OPTION.to_owned(),
                value: value.to_owned(),
            })
    }
}

/// How the bot presents itself in embeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    /// Application name.
    pub name: String,
    /// Short description shown under the title.
    pub description: String,
    /// Avatar URL shown next to the author line.
    pub icon_url: String,
}

impl BotIdentity {
    /// Creates an identity using the default avatar.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let app_name = name.into();
        Self {
            description: app_name.clone(),
            name: app_name,
            icon_url: "https://cdn.discordapp.com/embed/avatars/0.png".to_owned(),
        }
    }
}

/// Handler for `/info`.
pub struct InfoCommand<M>
where
    M: PerformanceMonitor,
{
    identity: BotIdentity,
    templates: Arc<ReplyTemplates>,
    monitor: Arc<M>,
}

impl<M> InfoCommand<M>
where
    M: PerformanceMonitor,
{
    /// Creates the handler.
    #[must_use]
    pub const fn new(identity: BotIdentity, templates: Arc<ReplyTemplates>, monitor: Arc<M>) -> Self {
        Self {
            identity,
            templates,
            monitor,
        }
    }

    /// Returns the declaration of `/info`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError`] if the declaration is invalid.
    pub fn descriptor() -> Result<CommandDescriptor, CommandDomainError> {
        let choices = InfoSubject::ALL
            .into_iter()
            .map(|subject| OptionChoice::new(subject.as_str(), subject.as_str()))
            .collect::<Result<Vec<_>, _>>()?;
        let subject = CommandOption::new(
            OptionType::String,
            SUBJECT_OPTION,
            "The subject to retrieve information about",
        )?
        .with_required(true)
        .with_choices(choices)?;
        CommandDescriptor::new("info", "Retrieve information")?.with_option(subject)
    }

    fn bot_reply(&self) -> Result<InteractionReply, CommandHandlerError> {
        let performance = self.monitor.snapshot();
        let embed = ReplyEmbed::new(self.plain("info.bot.title")?, SEA_GREEN)
            .with_description(self.identity.description.as_str())
            .with_author(self.identity.name.as_str(), self.identity.icon_url.as_str())
            .with_field(self.plain("info.bot.version")?, env!("CARGO_PKG_VERSION"))
            .with_field(self.plain("info.bot.library")?, LIBRARY)
            .with_field(self.plain("info.bot.language")?, LANGUAGE)
            .with_field(
                self.plain("info.bot.performance")?,
                self.templates
                    .render(
                        "info.bot.performance_value",
                        context! {
                            used => performance.used_megabytes(),
                            total => performance.total_megabytes(),
                            cpu => performance.cpu_percent(),
                            cores => performance.processors,
                        },
                    )
                    .map_err(CommandHandlerError::failed)?,
            );
        Ok(InteractionReply::embed(embed))
    }

    fn server_reply(&self, guild: &GuildSummary) -> Result<InteractionReply, CommandHandlerError> {
        let render = |name: &str, values| {
            self.templates
                .render(name, values)
                .map_err(CommandHandlerError::failed)
        };
        let birthday = guild.joined_at.map_or_else(
            || "unknown".to_owned(),
            |joined| format!("Birthday: {}", joined.date_naive()),
        );
        let embed = ReplyEmbed::new(
            render("info.server.title", context! { name => guild.name.as_str() })?,
            SEA_GREEN,
        )
        .with_author(self.identity.name.as_str(), self.identity.icon_url.as_str())
        .with_field(
            self.plain("info.server.owner")?,
            render("info.server.owner_value", context! { owner_id => guild.owner_id })?,
        )
        .with_field(self.plain("info.server.members")?, guild.member_count.to_string())
        .with_field(
            self.plain("info.server.boost")?,
            render(
                "info.server.boost_value",
                context! {
                    level => guild.premium_tier,
                    boosts => guild.premium_subscription_count,
                },
            )?,
        )
        .with_field(self.plain("info.server.birthday")?, birthday);
        Ok(InteractionReply::embed(embed))
    }

    fn plain(&self, name: &str) -> Result<String, CommandHandlerError> {
        self.templates
            .render_plain(name)
            .map_err(CommandHandlerError::failed)
    }
}

#[async_trait]
impl<M> CommandHandler for InfoCommand<M>
where
    M: PerformanceMonitor,
{
    async fn handle(
        &self,
        interaction: &CommandInteraction,
    ) -> Result<InteractionReply, CommandHandlerError> {
        let subject = InfoSubject::try_from(interaction.string_option(SUBJECT_OPTION)?)?;
        match subject {
            InfoSubject::Bot => self.bot_reply(),
            InfoSubject::Server => interaction.guild().map_or_else(
                || {
                    self.plain("info.server.outside_guild")
                        .map(|text| InteractionReply::text(text).ephemeral())
                },
                |guild| self.server_reply(guild),
            ),
        }
    }
}
