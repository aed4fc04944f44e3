//! Command registry contract against `PostgreSQL`.

use std::collections::BTreeSet;

use landau::command::{
    adapters::postgres::PostgresCommandRegistry,
    domain::{CommandName, CommandScope, GuildId, RegisteredCommand, RemoteCommandId},
    ports::{CommandRegistryError, CommandRegistryRepository},
};
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;

use crate::postgres::helpers::{TestDatabase, test_runtime};

const GUILD: CommandScope = CommandScope::Guild(GuildId::new(7));
const OTHER_GUILD: CommandScope = CommandScope::Guild(GuildId::new(8));

fn name(raw: &str) -> CommandName {
    CommandName::new(raw).expect("test command name should be valid")
}

fn registered(id: u64, raw_name: &str, scope: CommandScope) -> RegisteredCommand {
    RegisteredCommand::new(RemoteCommandId::new(id), name(raw_name), scope)
}

fn ids(raw: &[u64]) -> BTreeSet<RemoteCommandId> {
    raw.iter().copied().map(RemoteCommandId::new).collect()
}

#[rstest]
fn rows_are_found_only_in_their_scope(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "registry_scopes").expect("database setup");
    let registry = PostgresCommandRegistry::new(db.pool.clone());
    let rt = test_runtime();

    rt.block_on(async {
        registry
            .save(&registered(1_001, "info", CommandScope::Global))
            .await
            .expect("global save should succeed");
        registry
            .save(&registered(2_001, "info", GUILD))
            .await
            .expect("guild save should succeed");

        assert_eq!(
            registry
                .find_id_by_name(CommandScope::Global, &name("info"))
                .await
                .expect("lookup should succeed"),
            Some(RemoteCommandId::new(1_001))
        );
        assert_eq!(
            registry
                .find_id_by_name(GUILD, &name("info"))
                .await
                .expect("lookup should succeed"),
            Some(RemoteCommandId::new(2_001))
        );
        assert_eq!(
            registry
                .find_id_by_name(OTHER_GUILD, &name("info"))
                .await
                .expect("lookup should succeed"),
            None
        );
        assert!(
            registry
                .exists_by_name(GUILD, &name("info"))
                .await
                .expect("lookup should succeed")
        );
        assert!(
            !registry
                .exists_by_name(GUILD, &name("connect"))
                .await
                .expect("lookup should succeed")
        );
    });
}

#[rstest]
#[case(CommandScope::Global)]
#[case(GUILD)]
fn duplicate_name_maps_to_typed_error(
    shared_test_cluster: &'static TestCluster,
    #[case] scope: CommandScope,
) {
    let db = TestDatabase::create(shared_test_cluster, "registry_dup_name").expect("database setup");
    let registry = PostgresCommandRegistry::new(db.pool.clone());
    let rt = test_runtime();

    rt.block_on(async {
        registry
            .save(&registered(1_001, "info", scope))
            .await
            .expect("first save should succeed");

        let result = registry.save(&registered(1_002, "info", scope)).await;

        assert!(
            matches!(
                &result,
                Err(CommandRegistryError::DuplicateName { scope: rejected, name: duplicate })
                    if *rejected == scope && duplicate.as_str() == "info"
            ),
            "expected DuplicateName, got: {result:?}"
        );
    });
}

#[rstest]
#[case(CommandScope::Global)]
#[case(GUILD)]
fn duplicate_remote_id_maps_to_typed_error(
    shared_test_cluster: &'static TestCluster,
    #[case] scope: CommandScope,
) {
    let db = TestDatabase::create(shared_test_cluster, "registry_dup_id").expect("database setup");
    let registry = PostgresCommandRegistry::new(db.pool.clone());
    let rt = test_runtime();

    rt.block_on(async {
        registry
            .save(&registered(1_001, "info", scope))
            .await
            .expect("first save should succeed");

        let result = registry.save(&registered(1_001, "connect", scope)).await;

        assert!(
            matches!(
                &result,
                Err(CommandRegistryError::DuplicateRemoteId { remote_id, .. })
                    if *remote_id == RemoteCommandId::new(1_001)
            ),
            "expected DuplicateRemoteId, got: {result:?}"
        );
    });
}

#[rstest]
fn same_remote_id_may_live_in_different_guilds(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "registry_guild_ids").expect("database setup");
    let registry = PostgresCommandRegistry::new(db.pool.clone());
    let rt = test_runtime();

    rt.block_on(async {
        registry
            .save(&registered(3_001, "info", GUILD))
            .await
            .expect("first guild save should succeed");
        registry
            .save(&registered(3_001, "info", OTHER_GUILD))
            .await
            .expect("second guild save should succeed");

        assert_eq!(
            registry.known_guilds().await.expect("listing should succeed"),
            vec![GuildId::new(7), GuildId::new(8)]
        );
    });
}

#[rstest]
fn dangling_query_respects_names_and_scope(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "registry_dangling").expect("database setup");
    let registry = PostgresCommandRegistry::new(db.pool.clone());
    let rt = test_runtime();

    rt.block_on(async {
        for command in [
            registered(1_001, "info", CommandScope::Global),
            registered(1_002, "connect", CommandScope::Global),
            registered(2_001, "info", GUILD),
        ] {
            registry.save(&command).await.expect("save should succeed");
        }

        assert_eq!(
            registry
                .find_ids_not_in_names(CommandScope::Global, &[name("info")])
                .await
                .expect("query should succeed"),
            ids(&[1_002])
        );
        assert_eq!(
            registry
                .find_ids_not_in_names(CommandScope::Global, &[])
                .await
                .expect("query should succeed"),
            ids(&[1_001, 1_002])
        );
        assert_eq!(
            registry
                .find_ids_not_in_names(GUILD, &[])
                .await
                .expect("query should succeed"),
            ids(&[2_001])
        );
        assert!(
            registry
                .find_ids_not_in_names(OTHER_GUILD, &[])
                .await
                .expect("query should succeed")
                .is_empty()
        );
    });
}

#[rstest]
fn remove_by_id_is_scoped_and_reports_missing_rows(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "registry_remove").expect("database setup");
    let registry = PostgresCommandRegistry::new(db.pool.clone());
    let rt = test_runtime();

    rt.block_on(async {
        registry
            .save(&registered(4_001, "info", CommandScope::Global))
            .await
            .expect("global save should succeed");
        registry
            .save(&registered(4_001, "info", GUILD))
            .await
            .expect("guild save should succeed");

        registry
            .remove_by_id(GUILD, RemoteCommandId::new(4_001))
            .await
            .expect("remove should succeed");

        assert!(
            registry
                .list(GUILD)
                .await
                .expect("listing should succeed")
                .is_empty()
        );
        assert_eq!(
            registry
                .list(CommandScope::Global)
                .await
                .expect("listing should succeed"),
            vec![registered(4_001, "info", CommandScope::Global)]
        );

        let missing = registry.remove_by_id(GUILD, RemoteCommandId::new(4_001)).await;
        assert!(
            matches!(
                missing,
                Err(CommandRegistryError::NotFound { scope, remote_id })
                    if scope == GUILD && remote_id == RemoteCommandId::new(4_001)
            ),
            "expected NotFound, got: {missing:?}"
        );
    });
}

#[rstest]
fn list_is_ordered_by_name(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "registry_list").expect("database setup");
    let registry = PostgresCommandRegistry::new(db.pool.clone());
    let rt = test_runtime();

    rt.block_on(async {
        registry
            .save(&registered(5_002, "info", CommandScope::Global))
            .await
            .expect("save should succeed");
        registry
            .save(&registered(5_001, "connect", CommandScope::Global))
            .await
            .expect("save should succeed");

        assert_eq!(
            registry
                .list(CommandScope::Global)
                .await
                .expect("listing should succeed"),
            vec![
                registered(5_001, "connect", CommandScope::Global),
                registered(5_002, "info", CommandScope::Global),
            ]
        );
    });
}
