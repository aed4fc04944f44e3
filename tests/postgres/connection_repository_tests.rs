//! Service connection storage against `PostgreSQL`.

use std::sync::Arc;

use landau::connect::{
    adapters::{memory::StaticIdentifierValidator, postgres::PostgresConnectionRepository},
    domain::{Service, ServiceConnection, ServiceIdentifier, UserId},
    ports::{ConnectionRepository, ConnectionRepositoryError},
    services::{ConnectOutcome, ConnectService},
};
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

use crate::postgres::helpers::{TestDatabase, test_runtime};

fn connection(user: u64, identifier: &str) -> ServiceConnection {
    ServiceConnection::new(
        UserId::new(user),
        Service::Codewars,
        ServiceIdentifier::new(identifier).expect("identifier should be valid"),
        &DefaultClock,
    )
}

#[rstest]
fn saved_connection_is_visible_to_lookups(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "connection_save").expect("database setup");
    let repository = PostgresConnectionRepository::new(db.pool.clone());
    let rt = test_runtime();
    let stored = connection(1, "alice");

    rt.block_on(async {
        repository
            .save_service_connection(&stored)
            .await
            .expect("save should succeed");

        assert!(
            repository
                .is_user_already_connected(UserId::new(1), Service::Codewars)
                .await
                .expect("lookup should succeed")
        );
        assert!(
            repository
                .is_identifier_already_taken(Service::Codewars, stored.identifier())
                .await
                .expect("lookup should succeed")
        );
        assert!(
            !repository
                .is_user_already_connected(UserId::new(2), Service::Codewars)
                .await
                .expect("lookup should succeed")
        );

        let found = repository
            .find_by_user(UserId::new(1))
            .await
            .expect("listing should succeed");
        let summary: Vec<(u64, Service, &str)> = found
            .iter()
            .map(|row| (row.user_id().get(), row.service(), row.identifier().as_str()))
            .collect();
        assert_eq!(summary, vec![(1, Service::Codewars, "alice")]);
        assert_eq!(found.first().map(ServiceConnection::id), Some(stored.id()));
    });
}

#[rstest]
fn second_connection_for_user_maps_to_typed_error(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "connection_dup_user").expect("database setup");
    let repository = PostgresConnectionRepository::new(db.pool.clone());
    let rt = test_runtime();

    rt.block_on(async {
        repository
            .save_service_connection(&connection(1, "alice"))
            .await
            .expect("first save should succeed");

        let result = repository
            .save_service_connection(&connection(1, "alice-alt"))
            .await;

        assert!(
            matches!(
                result,
                Err(ConnectionRepositoryError::DuplicateUserService { user_id, service })
                    if user_id == UserId::new(1) && service == Service::Codewars
            ),
            "expected DuplicateUserService, got: {result:?}"
        );
    });
}

#[rstest]
fn claimed_identifier_maps_to_typed_error(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "connection_dup_id").expect("database setup");
    let repository = PostgresConnectionRepository::new(db.pool.clone());
    let rt = test_runtime();

    rt.block_on(async {
        repository
            .save_service_connection(&connection(1, "alice"))
            .await
            .expect("first save should succeed");

        let result = repository
            .save_service_connection(&connection(2, "alice"))
            .await;

        assert!(
            matches!(
                &result,
                Err(ConnectionRepositoryError::DuplicateIdentifier { identifier, .. })
                    if identifier.as_str() == "alice"
            ),
            "expected DuplicateIdentifier, got: {result:?}"
        );
        assert!(
            repository
                .find_by_user(UserId::new(2))
                .await
                .expect("listing should succeed")
                .is_empty()
        );
    });
}

#[rstest]
fn taken_identifier_is_refused_before_validation(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "connection_service").expect("database setup");
    let repository = Arc::new(PostgresConnectionRepository::new(db.pool.clone()));
    let rt = test_runtime();

    rt.block_on(async {
        repository
            .save_service_connection(&connection(1, "alice"))
            .await
            .expect("seed should succeed");

        // The validator knows no accounts, so reaching it would yield
        // `InvalidIdentifier` instead of the guarded outcomes.
        let service = ConnectService::new(Arc::clone(&repository), Arc::new(DefaultClock))
            .with_validator(
                Service::Codewars,
                Arc::new(StaticIdentifierValidator::new(std::iter::empty::<&str>())),
            );

        assert_eq!(
            service
                .connect(UserId::new(2), Service::Codewars, "alice")
                .await
                .expect("connect should succeed"),
            ConnectOutcome::IdentifierTaken
        );
        assert_eq!(
            service
                .connect(UserId::new(1), Service::Codewars, "bob")
                .await
                .expect("connect should succeed"),
            ConnectOutcome::AlreadyConnected
        );
    });
}
