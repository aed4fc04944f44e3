//! Domain model for application commands.
//!
//! Commands are declared locally as validated [`CommandDescriptor`] values,
//! registered remotely per [`CommandScope`], and tracked through
//! [`RegisteredCommand`] records. Interaction types describe what arrives when
//! a user invokes a command and what is sent back.

mod descriptor;
mod error;
mod ids;
mod interaction;
mod name;
mod registered;
mod remote;
mod scope;
mod settings;

pub use descriptor::{CommandDescriptor, CommandOption, OptionChoice, OptionType};
pub use error::{CommandDomainError, InteractionError};
pub use ids::{GuildId, RemoteCommandId};
pub use interaction::{
    CommandInteraction, EmbedField, GuildSummary, InteractionReply, OptionValue, ReplyEmbed,
};
pub use name::CommandName;
pub use registered::RegisteredCommand;
pub use remote::RemoteCommand;
pub use scope::CommandScope;
pub use settings::{CommandToggle, CommandsConfig};
