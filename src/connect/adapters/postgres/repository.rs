//! `PostgreSQL` repository implementation for service connections.

use super::{models::ServiceConnectionRow, schema::service_connection};
use crate::connect::{
    domain::{
        ConnectionId, PersistedConnectionData, Service, ServiceConnection, ServiceIdentifier,
        UserId,
    },
    ports::{ConnectionRepository, ConnectionRepositoryError, ConnectionRepositoryResult},
};
use crate::db::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed connection repository.
#[derive(Debug, Clone)]
pub struct PostgresConnectionRepository {
    pool: PgPool,
}

impl PostgresConnectionRepository {
    /// Creates a repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ConnectionRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ConnectionRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ConnectionRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ConnectionRepositoryError::persistence)?
    }
}

#[async_trait]
impl ConnectionRepository for PostgresConnectionRepository {
    async fn save_service_connection(
        &self,
        connection: &ServiceConnection,
    ) -> ConnectionRepositoryResult<()> {
        let row = to_row(connection)?;
        let user_id = connection.user_id();
        let service = connection.service();
        let identifier = connection.identifier().clone();

        self.run_blocking(move |pg| {
            diesel::insert_into(service_connection::table)
                .values(&row)
                .execute(pg)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_user_service_violation(info.as_ref()) =>
                    {
                        ConnectionRepositoryError::DuplicateUserService { user_id, service }
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ConnectionRepositoryError::DuplicateIdentifier {
                            service,
                            identifier: identifier.clone(),
                        }
                    }
                    _ => ConnectionRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn is_user_already_connected(
        &self,
        user_id: UserId,
        service: Service,
    ) -> ConnectionRepositoryResult<bool> {
        let discord_id = to_column(user_id)?;
        self.run_blocking(move |pg| {
            diesel::select(diesel::dsl::exists(
                service_connection::table
                    .filter(service_connection::discord_id.eq(discord_id))
                    .filter(service_connection::service.eq(service.as_str())),
            ))
            .get_result::<bool>(pg)
            .map_err(ConnectionRepositoryError::persistence)
        })
        .await
    }

    async fn is_identifier_already_taken(
        &self,
        service: Service,
        identifier: &ServiceIdentifier,
    ) -> ConnectionRepositoryResult<bool> {
        let identifier_str = identifier.as_str().to_owned();
        self.run_blocking(move |pg| {
            diesel::select(diesel::dsl::exists(
                service_connection::table
                    .filter(service_connection::service.eq(service.as_str()))
                    .filter(service_connection::service_identifier.eq(&identifier_str)),
            ))
            .get_result::<bool>(pg)
            .map_err(ConnectionRepositoryError::persistence)
        })
        .await
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> ConnectionRepositoryResult<Vec<ServiceConnection>> {
        let discord_id = to_column(user_id)?;
        self.run_blocking(move |pg| {
            let rows = service_connection::table
                .filter(service_connection::discord_id.eq(discord_id))
                .order(service_connection::service.asc())
                .select(ServiceConnectionRow::as_select())
                .load::<ServiceConnectionRow>(pg)
                .map_err(ConnectionRepositoryError::persistence)?;
            rows.into_iter().map(row_to_connection).collect()
        })
        .await
    }
}

fn to_column(user_id: UserId) -> ConnectionRepositoryResult<i64> {
    i64::try_from(user_id.get()).map_err(ConnectionRepositoryError::persistence)
}

fn to_row(connection: &ServiceConnection) -> ConnectionRepositoryResult<ServiceConnectionRow> {
    Ok(ServiceConnectionRow {
        id: connection.id().into_inner(),
        discord_id: to_column(connection.user_id())?,
        service: connection.service().as_str().to_owned(),
        service_identifier: connection.identifier().as_str().to_owned(),
        connected_at: connection.connected_at(),
    })
}

fn row_to_connection(row: ServiceConnectionRow) -> ConnectionRepositoryResult<ServiceConnection> {
    let ServiceConnectionRow {
        id,
        discord_id,
        service,
        service_identifier,
        connected_at,
    } = row;

    let user_id = u64::try_from(discord_id)
        .map(UserId::new)
        .map_err(ConnectionRepositoryError::invalid_persisted_data)?;
    let parsed_service = Service::try_from(service.as_str())
        .map_err(ConnectionRepositoryError::invalid_persisted_data)?;
    let identifier = ServiceIdentifier::new(service_identifier)
        .map_err(ConnectionRepositoryError::invalid_persisted_data)?;

    Ok(ServiceConnection::from_persisted(PersistedConnectionData {
        id: ConnectionId::from_uuid(id),
        user_id,
        service: parsed_service,
        identifier,
        connected_at,
    }))
}

fn is_user_service_violation(info: &dyn diesel::result::DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "uq_service_connection_user")
}
