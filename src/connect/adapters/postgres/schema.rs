//! Diesel schema for service connection persistence.

diesel::table! {
    /// Links between chat users and external service accounts.
    service_connection (id) {
        /// Connection identifier.
        id -> Uuid,
        /// Chat platform user id.
        discord_id -> Int8,
        /// Service storage key.
        #[max_length = 32]
        service -> Varchar,
        /// Account identifier on the service.
        #[max_length = 255]
        service_identifier -> Varchar,
        /// Creation timestamp.
        connected_at -> Timestamptz,
    }
}
