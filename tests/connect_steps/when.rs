//! When steps for connect scenarios.

use super::world::{ConnectWorld, run_async};
use landau::command::{
    domain::{CommandInteraction, OptionValue, RemoteCommandId},
    ports::CommandHandler,
};
use rstest_bdd_macros::when;

#[when(r#"user {user} connects "{identifier}" on "{service}""#)]
fn user_connects(
    world: &mut ConnectWorld,
    user: u64,
    identifier: String,
    service: String,
) -> Result<(), eyre::Report> {
    let interaction = CommandInteraction::new(RemoteCommandId::new(1_000), "connect", user)
        .with_option("service", OptionValue::String(service))
        .with_option("identifier", OptionValue::String(identifier));
    world.last_reply = Some(run_async(world.command.handle(&interaction))?);
    Ok(())
}
