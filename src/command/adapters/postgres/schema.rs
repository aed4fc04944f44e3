//! Diesel schema for command registry persistence.

diesel::table! {
    /// Commands registered in the global scope.
    global_command (id) {
        /// Row identifier.
        id -> Uuid,
        /// Gateway-assigned command identifier.
        command_id -> Int8,
        /// Command name.
        #[max_length = 32]
        command_name -> Varchar,
    }
}

diesel::table! {
    /// Commands registered in a guild scope.
    guild_command (id) {
        /// Row identifier.
        id -> Uuid,
        /// Owning guild.
        guild_id -> Int8,
        /// Gateway-assigned command identifier.
        command_id -> Int8,
        /// Command name.
        #[max_length = 32]
        command_name -> Varchar,
    }
}
