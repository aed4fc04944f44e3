//! Command gateway backed by the Discord HTTP API through serenity.

use std::num::NonZeroU64;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use serenity::all::{
    Command, CommandId, CommandOptionType, CreateCommand, CreateCommandOption,
    GuildId as DiscordGuildId, Http,
};
use serenity::http::HttpError;

use crate::command::{
    domain::{
        CommandDescriptor, CommandOption, CommandScope, OptionChoice, OptionType, RemoteCommand,
        RemoteCommandId,
    },
    ports::{CommandGateway, CommandGatewayError, CommandGatewayResult, CreatedCommand},
};

const NOT_FOUND: u16 = 404;

/// Gateway that registers commands through the Discord HTTP API.
///
/// The application id must already be set on the [`Http`] client.
#[derive(Clone)]
pub struct DiscordCommandGateway {
    http: Arc<Http>,
}

impl DiscordCommandGateway {
    /// Creates a gateway over an authenticated HTTP client.
    #[must_use]
    pub const fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

impl std::fmt::Debug for DiscordCommandGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordCommandGateway").finish_non_exhaustive()
    }
}

#[async_trait]
impl CommandGateway for DiscordCommandGateway {
    async fn create(
        &self,
        scope: CommandScope,
        descriptor: &CommandDescriptor,
    ) -> CommandGatewayResult<CreatedCommand> {
        let request = to_request(descriptor)?;
        let command = match scope {
            CommandScope::Global => Command::create_global_command(&self.http, request).await,
            CommandScope::Guild(guild_id) => {
                discord_guild_id(guild_id.get())?
                    .create_command(&self.http, request)
                    .await
            }
        }
        .map_err(|err| map_error(scope, None, err))?;

        Ok(CreatedCommand {
            id: RemoteCommandId::new(command.id.get()),
            name: command.name,
        })
    }

    async fn modify(
        &self,
        scope: CommandScope,
        id: RemoteCommandId,
        descriptor: &CommandDescriptor,
    ) -> CommandGatewayResult<()> {
        let request = to_request(descriptor)?;
        let command_id = discord_command_id(id)?;
        match scope {
            CommandScope::Global => {
                Command::edit_global_command(&self.http, command_id, request).await
            }
            CommandScope::Guild(guild_id) => {
                discord_guild_id(guild_id.get())?
                    .edit_command(&self.http, command_id, request)
                    .await
            }
        }
        .map_err(|err| map_error(scope, Some(id), err))?;
        Ok(())
    }

    async fn delete(&self, scope: CommandScope, id: RemoteCommandId) -> CommandGatewayResult<()> {
        let command_id = discord_command_id(id)?;
        match scope {
            CommandScope::Global => Command::delete_global_command(&self.http, command_id).await,
            CommandScope::Guild(guild_id) => {
                discord_guild_id(guild_id.get())?
                    .delete_command(&self.http, command_id)
                    .await
            }
        }
        .map_err(|err| map_error(scope, Some(id), err))
    }

    async fn fetch(
        &self,
        scope: CommandScope,
        id: RemoteCommandId,
    ) -> CommandGatewayResult<RemoteCommand> {
        let command_id = discord_command_id(id)?;
        let command = match scope {
            CommandScope::Global => Command::get_global_command(&self.http, command_id).await,
            CommandScope::Guild(guild_id) => {
                discord_guild_id(guild_id.get())?
                    .get_command(&self.http, command_id)
                    .await
            }
        }
        .map_err(|err| map_error(scope, Some(id), err))?;
        Ok(to_remote(command))
    }
}

fn discord_command_id(id: RemoteCommandId) -> CommandGatewayResult<CommandId> {
    NonZeroU64::new(id.get())
        .map(CommandId::from)
        .ok_or_else(|| CommandGatewayError::Rejected("command id must be non-zero".to_owned()))
}

fn discord_guild_id(id: u64) -> CommandGatewayResult<DiscordGuildId> {
    NonZeroU64::new(id)
        .map(DiscordGuildId::from)
        .ok_or_else(|| CommandGatewayError::Rejected("guild id must be non-zero".to_owned()))
}

fn map_error(
    scope: CommandScope,
    id: Option<RemoteCommandId>,
    err: serenity::Error,
) -> CommandGatewayError {
    if let serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) = &err {
        let status = response.status_code.as_u16();
        if status == NOT_FOUND
            && let Some(missing) = id
        {
            return CommandGatewayError::UnknownCommand { scope, id: missing };
        }
        if (400..500).contains(&status) {
            return CommandGatewayError::Rejected(format!(
                "HTTP {status}: {}",
                response.error.message
            ));
        }
    }
    CommandGatewayError::transport(err)
}

fn option_kind(option_type: OptionType) -> CommandOptionType {
    match option_type {
        OptionType::String => CommandOptionType::String,
        OptionType::Integer => CommandOptionType::Integer,
        OptionType::Boolean => CommandOptionType::Boolean,
        OptionType::User => CommandOptionType::User,
        OptionType::Channel => CommandOptionType::Channel,
        OptionType::Role => CommandOptionType::Role,
        OptionType::Mentionable => CommandOptionType::Mentionable,
    }
}

fn domain_option_type(kind: CommandOptionType) -> Option<OptionType> {
    match kind {
        CommandOptionType::String => Some(OptionType::String),
        CommandOptionType::Integer => Some(OptionType::Integer),
        CommandOptionType::Boolean => Some(OptionType::Boolean),
        CommandOptionType::User => Some(OptionType::User),
        CommandOptionType::Channel => Some(OptionType::Channel),
        CommandOptionType::Role => Some(OptionType::Role),
        CommandOptionType::Mentionable => Some(OptionType::Mentionable),
        _ => None,
    }
}

fn to_request(descriptor: &CommandDescriptor) -> CommandGatewayResult<CreateCommand> {
    let request =
        CreateCommand::new(descriptor.name().as_str()).description(descriptor.description());
    descriptor
        .options()
        .iter()
        .try_fold(request, |built, option| {
            Ok(built.add_option(to_request_option(option)?))
        })
}

fn to_request_option(option: &CommandOption) -> CommandGatewayResult<CreateCommandOption> {
    let request = CreateCommandOption::new(
        option_kind(option.option_type()),
        option.name().as_str(),
        option.description(),
    )
    .required(option.is_required());

    option
        .choices()
        .iter()
        .try_fold(request, |built, choice| match option.option_type() {
            OptionType::Integer => {
                let value = choice.value().parse::<i32>().map_err(|err| {
                    CommandGatewayError::Rejected(format!(
                        "integer choice '{}' of option '{}': {err}",
                        choice.name(),
                        option.name()
                    ))
                })?;
                Ok(built.add_int_choice(choice.name(), value))
            }
            _ => Ok(built.add_string_choice(choice.name(), choice.value())),
        })
}

fn to_remote(command: Command) -> RemoteCommand {
    let remote = RemoteCommand::new(
        RemoteCommandId::new(command.id.get()),
        command.name,
        command.description,
    );
    let options: Option<Vec<CommandOption>> =
        command.options.into_iter().map(to_domain_option).collect();
    let unrepresentable = options.is_none();
    let converted = remote.with_options(options.unwrap_or_default());
    if unrepresentable {
        converted.with_unrepresentable_options()
    } else {
        converted
    }
}

fn to_domain_option(option: serenity::all::CommandOption) -> Option<CommandOption> {
    if !option.options.is_empty() {
        return None;
    }
    let option_type = domain_option_type(option.kind)?;
    let choices = option
        .choices
        .into_iter()
        .map(|choice| {
            let value = match choice.value {
                Value::String(text) => text,
                Value::Number(number) => number.to_string(),
                _ => return None,
            };
            OptionChoice::new(choice.name, value).ok()
        })
        .collect::<Option<Vec<_>>>()?;

    CommandOption::new(option_type, option.name, option.description)
        .ok()?
        .with_required(option.required)
        .with_choices(choices)
        .ok()
}
