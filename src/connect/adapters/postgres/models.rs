//! Diesel row models for service connection persistence.

use super::schema::service_connection;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query and insert row for service connections.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = service_connection)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ServiceConnectionRow {
    /// Connection identifier.
    pub id: uuid::Uuid,
    /// Chat platform user id.
    pub discord_id: i64,
    /// Service storage key.
    pub service: String,
    /// Account identifier on the service.
    pub service_identifier: String,
    /// Creation timestamp.
    pub connected_at: DateTime<Utc>,
}
