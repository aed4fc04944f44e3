//! Shared helpers for `PostgreSQL` integration tests.
//!
//! Every test runs in its own database cloned from a template that already
//! carries the schema. The database is dropped when the returned
//! [`TestDatabase`] goes out of scope.

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use landau::db::PgPool;
use pg_embedded_setup_unpriv::TestCluster;
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Boxed error used by helper results.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Schema applied to the template database.
pub const SCHEMA_SQL: &str =
    include_str!("../../migrations/2021-06-01-000000_create_landau_tables/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "landau_test_template";

/// Creates a tokio runtime for driving async repositories from sync tests.
pub fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|e| eyre::eyre!("{e}"))?;
            conn.batch_execute(SCHEMA_SQL)
                .map_err(|e| eyre::eyre!("schema bootstrap failed: {e}"))?;
            Ok(())
        })
        .map_err(|e| Box::new(e) as BoxError)?;
    Ok(())
}

/// A database cloned from the template, dropped on scope exit.
///
/// The pool is declared first so its connections close before the database
/// is dropped.
pub struct TestDatabase {
    /// Pool connected to the database.
    pub pool: PgPool,
    guard: CleanupGuard<'static>,
}

impl TestDatabase {
    /// Clones the template into a fresh database named after `label`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database or pool cannot be created.
    pub fn create(cluster: &'static TestCluster, label: &str) -> Result<Self, BoxError> {
        ensure_template(cluster)?;
        let db_name = format!("{label}_{}", Uuid::new_v4().simple());
        cluster
            .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
            .map_err(|e| Box::new(e) as BoxError)?;
        let guard = CleanupGuard {
            cluster,
            db_name: db_name.clone(),
        };
        let manager = ConnectionManager::<PgConnection>::new(cluster.connection().database_url(&db_name));
        let pool = Pool::builder()
            .max_size(2)
            .build(manager)
            .map_err(|e| Box::new(e) as BoxError)?;
        Ok(Self { pool, guard })
    }
}

struct CleanupGuard<'a> {
    cluster: &'a TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.cluster.drop_database(self.db_name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {e}", self.db_name);
        }
    }
}
