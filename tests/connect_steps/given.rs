//! Given steps for connect scenarios.

use super::world::{ConnectWorld, run_async};
use landau::connect::{
    domain::{Service, ServiceConnection, ServiceIdentifier, UserId},
    ports::ConnectionRepository,
};
use mockable::DefaultClock;
use rstest_bdd_macros::given;

#[given(r#"a Codewars account "{identifier}" exists"#)]
fn account_exists(world: &mut ConnectWorld, identifier: String) -> Result<(), eyre::Report> {
    world.validator.add(&identifier)
}

#[given(r#"user {user} has connected "{identifier}" on Codewars"#)]
fn user_has_connected(
    world: &mut ConnectWorld,
    user: u64,
    identifier: String,
) -> Result<(), eyre::Report> {
    let connection = ServiceConnection::new(
        UserId::new(user),
        Service::Codewars,
        ServiceIdentifier::new(identifier)?,
        &DefaultClock,
    );
    run_async(world.repository.save_service_connection(&connection))?;
    Ok(())
}
