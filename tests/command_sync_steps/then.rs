//! Then steps for command synchronization scenarios.

use super::world::{SyncWorld, run_async};
use landau::command::{
    adapters::memory::GatewayCall,
    domain::{CommandScope, GuildId},
    ports::CommandRegistryRepository,
};
use rstest_bdd_macros::then;

#[then(r#""{name}" is registered in the global scope"#)]
fn registered_globally(world: &SyncWorld, name: String) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.is_registered(CommandScope::Global, &name)?,
        "expected '{name}' to be registered globally"
    );
    Ok(())
}

#[then(r#""{name}" is not registered in the global scope"#)]
fn not_registered_globally(world: &SyncWorld, name: String) -> Result<(), eyre::Report> {
    eyre::ensure!(
        !world.is_registered(CommandScope::Global, &name)?,
        "expected '{name}' to be absent globally"
    );
    Ok(())
}

#[then(r#""{name}" is registered in guild {guild}"#)]
fn registered_in_guild(world: &SyncWorld, name: String, guild: u64) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.is_registered(CommandScope::Guild(GuildId::new(guild)), &name)?,
        "expected '{name}' to be registered in guild {guild}"
    );
    Ok(())
}

#[then(r#""{name}" is not registered in guild {guild}"#)]
fn not_registered_in_guild(
    world: &SyncWorld,
    name: String,
    guild: u64,
) -> Result<(), eyre::Report> {
    eyre::ensure!(
        !world.is_registered(CommandScope::Guild(GuildId::new(guild)), &name)?,
        "expected '{name}' to be absent from guild {guild}"
    );
    Ok(())
}

#[then("the global scope holds {count} registered commands")]
fn global_count(world: &SyncWorld, count: usize) -> Result<(), eyre::Report> {
    let registered = run_async(world.registry.list(CommandScope::Global))?;
    eyre::ensure!(
        registered.len() == count,
        "expected {count} registered commands, found {}",
        registered.len()
    );
    Ok(())
}

#[then("the gateway received {deletes} delete calls and {updates} update calls")]
fn gateway_received(world: &SyncWorld, deletes: usize, updates: usize) -> Result<(), eyre::Report> {
    let calls = world.last_calls()?;
    let delete_count = calls
        .iter()
        .filter(|call| matches!(call, GatewayCall::Delete { .. }))
        .count();
    let update_count = calls
        .iter()
        .filter(|call| matches!(call, GatewayCall::Modify { .. }))
        .count();
    eyre::ensure!(
        (delete_count, update_count) == (deletes, updates),
        "expected {deletes} deletes and {updates} updates, got {delete_count} and {update_count}"
    );
    Ok(())
}

#[then("the last reconciliation made no remote mutations")]
fn no_mutations(world: &SyncWorld) -> Result<(), eyre::Report> {
    let mutations: Vec<GatewayCall> = world
        .last_calls()?
        .into_iter()
        .filter(GatewayCall::is_mutation)
        .collect();
    eyre::ensure!(mutations.is_empty(), "unexpected mutations: {mutations:?}");
    Ok(())
}

#[then("no dangling commands remain in the global scope")]
fn no_dangling(world: &SyncWorld) -> Result<(), eyre::Report> {
    let names: Vec<_> = world
        .declared
        .iter()
        .map(|descriptor| descriptor.name().clone())
        .collect();
    let dangling = run_async(
        world
            .registry
            .find_ids_not_in_names(CommandScope::Global, &names),
    )?;
    eyre::ensure!(dangling.is_empty(), "dangling commands: {dangling:?}");
    Ok(())
}
