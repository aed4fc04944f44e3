//! `/connect` command: links the caller to an external service account.

use async_trait::async_trait;
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

use crate::bot::render::ReplyTemplates;
use crate::command::{
    domain::{
        CommandDescriptor, CommandDomainError, CommandInteraction, CommandOption,
        InteractionError, InteractionReply, OptionChoice, OptionType,
    },
    ports::{CommandHandler, CommandHandlerError},
};
use crate::connect::{
    domain::{Service, UserId},
    ports::ConnectionRepository,
    services::{ConnectOutcome, ConnectService, ConnectServiceError},
};

const SERVICE_OPTION: &str = "service";
const IDENTIFIER_OPTION: &str = "identifier";

/// Handler for `/connect`.
pub struct ConnectCommand<R, C>
where
    R: ConnectionRepository,
    C: Clock + Send + Sync,
{
    service: Arc<ConnectService<R, C>>,
    templates: Arc<ReplyTemplates>,
}

impl<R, C> ConnectCommand<R, C>
where
    R: ConnectionRepository,
    C: Clock + Send + Sync,
{
    /// Creates the handler.
    #[must_use]
    pub const fn new(service: Arc<ConnectService<R, C>>, templates: Arc<ReplyTemplates>) -> Self {
        Self { service, templates }
    }

    /// Returns the declaration of `/connect`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandDomainError`] if the declaration is invalid.
    pub fn descriptor() -> Result<CommandDescriptor, CommandDomainError> {
        let choices = Service::ALL
            .into_iter()
            .map(|service| OptionChoice::new(service.key(), service.choice_value()))
            .collect::<Result<Vec<_>, _>>()?;
        let service = CommandOption::new(
            OptionType::String,
            SERVICE_OPTION,
            "The service that should be connected",
        )?
        .with_required(true)
        .with_choices(choices)?;
        let identifier = CommandOption::new(
            OptionType::String,
            IDENTIFIER_OPTION,
            "The identifier of the service",
        )?
        .with_required(true);
        CommandDescriptor::new("connect", "Connect user with a service")?
            .with_option(service)?
            .with_option(identifier)
    }

    fn reply(&self, template: &str) -> Result<InteractionReply, CommandHandlerError> {
        self.templates
            .render_plain(template)
            .map(InteractionReply::text)
            .map_err(CommandHandlerError::failed)
    }
}

#[async_trait]
impl<R, C> CommandHandler for ConnectCommand<R, C>
where
    R: ConnectionRepository,
    C: Clock + Send + Sync,
{
    async fn handle(
        &self,
        interaction: &CommandInteraction,
    ) -> Result<InteractionReply, CommandHandlerError> {
        let raw_service = interaction.string_option(SERVICE_OPTION)?;
        let service =
            Service::try_from(raw_service).map_err(|_| InteractionError::UnknownChoice {
                option: SERVICE_OPTION.to_owned(),
                value: raw_service.to_owned(),
            })?;
        let identifier = interaction.string_option(IDENTIFIER_OPTION)?;
        let user_id = UserId::new(interaction.user_id());

        match self.service.connect(user_id, service, identifier).await {
            Ok(ConnectOutcome::Connected(connection)) => {
                info!(
                    user = %user_id,
                    %service,
                    identifier = %connection.identifier(),
                    "connected user to service"
                );
                self.reply("connect.connected")
            }
            Ok(ConnectOutcome::AlreadyConnected) => self.reply("connect.already_connected"),
            Ok(ConnectOutcome::IdentifierTaken) => self.reply("connect.identifier_taken"),
            Ok(ConnectOutcome::InvalidIdentifier) | Err(ConnectServiceError::Domain(_)) => {
                self.reply("connect.invalid_identifier")
            }
            Err(err) => Err(CommandHandlerError::failed(err)),
        }
    }
}
