//! Diesel row models for command registry persistence.

use super::schema::{global_command, guild_command};
use diesel::prelude::*;

/// Insert model for global registrations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = global_command)]
pub struct NewGlobalCommandRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Gateway-assigned command identifier.
    pub command_id: i64,
    /// Command name.
    pub command_name: String,
}

/// Insert model for guild registrations.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = guild_command)]
pub struct NewGuildCommandRow {
    /// Row identifier.
    pub id: uuid::Uuid,
    /// Owning guild.
    pub guild_id: i64,
    /// Gateway-assigned command identifier.
    pub command_id: i64,
    /// Command name.
    pub command_name: String,
}

/// Identifier and name pair read back from either table.
#[derive(Debug, Clone, Queryable)]
pub struct CommandIdentityRow {
    /// Gateway-assigned command identifier.
    pub command_id: i64,
    /// Command name.
    pub command_name: String,
}
