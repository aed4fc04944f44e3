//! `PostgreSQL` repository implementation for the command registry.
//!
//! Global registrations live in `global_command`, guild registrations in
//! `guild_command`. Every query is routed to one table by the scope, and guild
//! queries are additionally filtered by guild id.

use super::{
    models::{CommandIdentityRow, NewGlobalCommandRow, NewGuildCommandRow},
    schema::{global_command, guild_command},
};
use crate::command::{
    domain::{CommandName, CommandScope, GuildId, RegisteredCommand, RemoteCommandId},
    ports::{CommandRegistryError, CommandRegistryRepository, CommandRegistryResult},
};
use crate::db::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use std::collections::BTreeSet;

/// `PostgreSQL`-backed command registry.
#[derive(Debug, Clone)]
pub struct PostgresCommandRegistry {
    pool: PgPool,
}

impl PostgresCommandRegistry {
    /// Creates a repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CommandRegistryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CommandRegistryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(CommandRegistryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(CommandRegistryError::persistence)?
    }
}

#[async_trait]
impl CommandRegistryRepository for PostgresCommandRegistry {
    async fn save(&self, command: &RegisteredCommand) -> CommandRegistryResult<()> {
        let scope = command.scope();
        let name = command.name().clone();
        let remote_id = command.remote_id();
        let command_id = to_column(remote_id.get())?;

        self.run_blocking(move |connection| {
            let inserted = match scope {
                CommandScope::Global => diesel::insert_into(global_command::table)
                    .values(&NewGlobalCommandRow {
                        id: uuid::Uuid::new_v4(),
                        command_id,
                        command_name: name.as_str().to_owned(),
                    })
                    .execute(connection),
                CommandScope::Guild(guild_id) => diesel::insert_into(guild_command::table)
                    .values(&NewGuildCommandRow {
                        id: uuid::Uuid::new_v4(),
                        guild_id: to_column(guild_id.get())?,
                        command_id,
                        command_name: name.as_str().to_owned(),
                    })
                    .execute(connection),
            };
            inserted.map_err(|err| match err {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                    if is_name_unique_violation(info.as_ref()) =>
                {
                    CommandRegistryError::DuplicateName {
                        scope,
                        name: name.clone(),
                    }
                }
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    CommandRegistryError::DuplicateRemoteId { scope, remote_id }
                }
                _ => CommandRegistryError::persistence(err),
            })?;
            Ok(())
        })
        .await
    }

    async fn find_id_by_name(
        &self,
        scope: CommandScope,
        name: &CommandName,
    ) -> CommandRegistryResult<Option<RemoteCommandId>> {
        let name_str = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            let found = match scope {
                CommandScope::Global => global_command::table
                    .filter(global_command::command_name.eq(&name_str))
                    .select(global_command::command_id)
                    .first::<i64>(connection)
                    .optional(),
                CommandScope::Guild(guild_id) => guild_command::table
                    .filter(guild_command::guild_id.eq(to_column(guild_id.get())?))
                    .filter(guild_command::command_name.eq(&name_str))
                    .select(guild_command::command_id)
                    .first::<i64>(connection)
                    .optional(),
            }
            .map_err(CommandRegistryError::persistence)?;
            found.map(remote_id_from_column).transpose()
        })
        .await
    }

    async fn exists_by_name(
        &self,
        scope: CommandScope,
        name: &CommandName,
    ) -> CommandRegistryResult<bool> {
        let name_str = name.as_str().to_owned();
        self.run_blocking(move |connection| {
            match scope {
                CommandScope::Global => diesel::select(diesel::dsl::exists(
                    global_command::table.filter(global_command::command_name.eq(&name_str)),
                ))
                .get_result::<bool>(connection),
                CommandScope::Guild(guild_id) => diesel::select(diesel::dsl::exists(
                    guild_command::table
                        .filter(guild_command::guild_id.eq(to_column(guild_id.get())?))
                        .filter(guild_command::command_name.eq(&name_str)),
                ))
                .get_result::<bool>(connection),
            }
            .map_err(CommandRegistryError::persistence)
        })
        .await
    }

    async fn find_ids_not_in_names(
        &self,
        scope: CommandScope,
        names: &[CommandName],
    ) -> CommandRegistryResult<BTreeSet<RemoteCommandId>> {
        let name_list: Vec<String> = names.iter().map(|name| name.as_str().to_owned()).collect();
        self.run_blocking(move |connection| {
            let ids = match scope {
                CommandScope::Global => global_command::table
                    .filter(global_command::command_name.ne_all(&name_list))
                    .select(global_command::command_id)
                    .load::<i64>(connection),
                CommandScope::Guild(guild_id) => guild_command::table
                    .filter(guild_command::guild_id.eq(to_column(guild_id.get())?))
                    .filter(guild_command::command_name.ne_all(&name_list))
                    .select(guild_command::command_id)
                    .load::<i64>(connection),
            }
            .map_err(CommandRegistryError::persistence)?;
            ids.into_iter().map(remote_id_from_column).collect()
        })
        .await
    }

    async fn remove_by_id(
        &self,
        scope: CommandScope,
        remote_id: RemoteCommandId,
    ) -> CommandRegistryResult<()> {
        let command_id = to_column(remote_id.get())?;
        self.run_blocking(move |connection| {
            let deleted = match scope {
                CommandScope::Global => diesel::delete(
                    global_command::table.filter(global_command::command_id.eq(command_id)),
                )
                .execute(connection),
                CommandScope::Guild(guild_id) => diesel::delete(
                    guild_command::table
                        .filter(guild_command::guild_id.eq(to_column(guild_id.get())?))
                        .filter(guild_command::command_id.eq(command_id)),
                )
                .execute(connection),
            }
            .map_err(CommandRegistryError::persistence)?;

            if deleted == 0 {
                return Err(CommandRegistryError::NotFound { scope, remote_id });
            }
            Ok(())
        })
        .await
    }

    async fn list(&self, scope: CommandScope) -> CommandRegistryResult<Vec<RegisteredCommand>> {
        self.run_blocking(move |connection| {
            let rows = match scope {
                CommandScope::Global => global_command::table
                    .select((global_command::command_id, global_command::command_name))
                    .order(global_command::command_name.asc())
                    .load::<CommandIdentityRow>(connection),
                CommandScope::Guild(guild_id) => guild_command::table
                    .filter(guild_command::guild_id.eq(to_column(guild_id.get())?))
                    .select((guild_command::command_id, guild_command::command_name))
                    .order(guild_command::command_name.asc())
                    .load::<CommandIdentityRow>(connection),
            }
            .map_err(CommandRegistryError::persistence)?;
            rows.into_iter()
                .map(|row| row_to_registered(row, scope))
                .collect()
        })
        .await
    }

    async fn known_guilds(&self) -> CommandRegistryResult<Vec<GuildId>> {
        self.run_blocking(move |connection| {
            let guild_ids = guild_command::table
                .select(guild_command::guild_id)
                .distinct()
                .order(guild_command::guild_id.asc())
                .load::<i64>(connection)
                .map_err(CommandRegistryError::persistence)?;
            guild_ids
                .into_iter()
                .map(|value| {
                    u64::try_from(value)
                        .map(GuildId::new)
                        .map_err(CommandRegistryError::invalid_persisted_data)
                })
                .collect()
        })
        .await
    }
}

fn to_column(value: u64) -> CommandRegistryResult<i64> {
    i64::try_from(value).map_err(CommandRegistryError::persistence)
}

fn remote_id_from_column(value: i64) -> CommandRegistryResult<RemoteCommandId> {
    u64::try_from(value)
        .map(RemoteCommandId::new)
        .map_err(CommandRegistryError::invalid_persisted_data)
}

fn row_to_registered(
    row: CommandIdentityRow,
    scope: CommandScope,
) -> CommandRegistryResult<RegisteredCommand> {
    let CommandIdentityRow {
        command_id,
        command_name,
    } = row;
    let name = CommandName::new(command_name).map_err(CommandRegistryError::invalid_persisted_data)?;
    Ok(RegisteredCommand::new(
        remote_id_from_column(command_id)?,
        name,
        scope,
    ))
}

fn is_name_unique_violation(info: &dyn diesel::result::DatabaseErrorInformation) -> bool {
    info.constraint_name().is_some_and(|name| {
        name == "uq_global_command_name" || name == "uq_guild_command_name"
    })
}
