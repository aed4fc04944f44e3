//! Serenity glue: converts platform interactions, dispatches them and sends
//! the replies back.

use chrono::DateTime;
use serenity::all::{
    CommandDataOptionValue, CommandInteraction as PlatformCommand, Context, CreateEmbed,
    CreateEmbedAuthor, CreateInteractionResponse, CreateInteractionResponseMessage,
    EventHandler, Interaction, Ready,
};
use serenity::async_trait;
use std::sync::Arc;
use tracing::{error, info};

use crate::bot::render::Emoji;
use crate::command::{
    domain::{
        CommandInteraction, GuildId, GuildSummary, InteractionReply, OptionValue, RemoteCommandId,
        ReplyEmbed,
    },
    services::InteractionDispatcher,
};

/// Event handler routing slash command interactions to the dispatcher.
pub struct LandauHandler {
    dispatcher: Arc<InteractionDispatcher>,
}

impl LandauHandler {
    /// Creates a handler over a fully built dispatcher.
    #[must_use]
    pub const fn new(dispatcher: Arc<InteractionDispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl EventHandler for LandauHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            user = %ready.user.name,
            guilds = ready.guilds.len(),
            "connected to the gateway"
        );
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        let request = to_interaction(&ctx, &command);
        match self.dispatcher.dispatch(&request).await {
            Ok(Some(reply)) => respond(&ctx, &command, &reply).await,
            Ok(None) => {}
            Err(err) => {
                error!(command = %command.data.name, error = %err, "command failed");
                let reply =
                    InteractionReply::text(format!("{} Something went wrong", Emoji::Cross))
                        .ephemeral();
                respond(&ctx, &command, &reply).await;
            }
        }
    }
}

fn to_interaction(ctx: &Context, command: &PlatformCommand) -> CommandInteraction {
    let base = CommandInteraction::new(
        RemoteCommandId::new(command.data.id.get()),
        command.data.name.as_str(),
        command.user.id.get(),
    );
    let with_options = command
        .data
        .options
        .iter()
        .filter_map(|option| {
            to_option_value(&option.value).map(|value| (option.name.as_str(), value))
        })
        .fold(base, |interaction, (name, value)| {
            interaction.with_option(name, value)
        });
    command
        .guild_id
        .and_then(|guild_id| guild_summary(ctx, guild_id))
        .into_iter()
        .fold(with_options, CommandInteraction::with_guild)
}

fn to_option_value(value: &CommandDataOptionValue) -> Option<OptionValue> {
    match value {
        CommandDataOptionValue::String(text) => Some(OptionValue::String(text.clone())),
        CommandDataOptionValue::Integer(number) => Some(OptionValue::Integer(*number)),
        CommandDataOptionValue::Boolean(flag) => Some(OptionValue::Boolean(*flag)),
        CommandDataOptionValue::User(user_id) => Some(OptionValue::User(user_id.get())),
        CommandDataOptionValue::Channel(channel_id) => {
            Some(OptionValue::Channel(channel_id.get()))
        }
        CommandDataOptionValue::Role(role_id) => Some(OptionValue::Role(role_id.get())),
        _ => None,
    }
}

fn guild_summary(ctx: &Context, guild_id: serenity::all::GuildId) -> Option<GuildSummary> {
    let guild = ctx.cache.guild(guild_id)?;
    Some(GuildSummary {
        id: GuildId::new(guild_id.get()),
        name: guild.name.clone(),
        owner_id: guild.owner_id.get(),
        member_count: guild.member_count,
        premium_tier: u8::from(guild.premium_tier),
        premium_subscription_count: guild.premium_subscription_count.unwrap_or_default(),
        joined_at: DateTime::from_timestamp(guild.joined_at.unix_timestamp(), 0),
    })
}

async fn respond(ctx: &Context, command: &PlatformCommand, reply: &InteractionReply) {
    let mut message = CreateInteractionResponseMessage::new().ephemeral(reply.is_ephemeral());
    if let Some(content) = reply.content() {
        message = message.content(content);
    }
    if let Some(embed) = reply.embed_content() {
        message = message.embed(to_embed(embed));
    }
    if let Err(err) = command
        .create_response(ctx, CreateInteractionResponse::Message(message))
        .await
    {
        error!(command = %command.data.name, error = %err, "failed to send interaction reply");
    }
}

fn to_embed(embed: &ReplyEmbed) -> CreateEmbed {
    let mut builder = CreateEmbed::new()
        .title(embed.title.as_str())
        .colour(embed.colour);
    if let Some(description) = &embed.description {
        builder = builder.description(description.as_str());
    }
    if let Some((name, icon_url)) = &embed.author {
        builder = builder.author(CreateEmbedAuthor::new(name.as_str()).icon_url(icon_url.as_str()));
    }
    builder.fields(
        embed
            .fields
            .iter()
            .map(|field| (field.name.as_str(), field.value.as_str(), field.inline)),
    )
}
