//! When steps for command synchronization scenarios.

use super::world::SyncWorld;
use landau::command::domain::{CommandScope, GuildId};
use rstest_bdd_macros::when;

#[when("the global scope is reconciled")]
fn reconcile_global(world: &mut SyncWorld) -> Result<(), eyre::Report> {
    world.reconcile(CommandScope::Global)
}

#[when("guild {guild} is reconciled")]
fn reconcile_guild(world: &mut SyncWorld, guild: u64) -> Result<(), eyre::Report> {
    world.reconcile(CommandScope::Guild(GuildId::new(guild)))
}

#[when(r#""{name}" is disabled globally"#)]
fn disable_globally(world: &mut SyncWorld, name: String) {
    world.config = world.config.clone().with_global(name, false);
}
