//! Given steps for command synchronization scenarios.

use super::world::SyncWorld;
use landau::command::domain::{CommandScope, GuildId};
use rstest_bdd_macros::given;

#[given("the bot declares the info and connect commands")]
fn bot_declares_commands(world: &mut SyncWorld) -> Result<(), eyre::Report> {
    world.declare_bot_commands()
}

#[given(r#"guild {guild} enables "{name}""#)]
fn guild_enables(world: &mut SyncWorld, guild: u64, name: String) {
    world.config = world.config.clone().with_guild(GuildId::new(guild), name, true);
}

#[given(r#"the gateway rejects "{name}""#)]
fn gateway_rejects(world: &mut SyncWorld, name: String) -> Result<(), eyre::Report> {
    world.gateway.fail_for(name)?;
    Ok(())
}

#[given("the global scope has been reconciled")]
fn global_scope_reconciled(world: &mut SyncWorld) -> Result<(), eyre::Report> {
    world.reconcile(CommandScope::Global)
}
