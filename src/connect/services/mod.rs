//! Application services for service connections.

mod connect;

pub use connect::{ConnectOutcome, ConnectService, ConnectServiceError, ConnectServiceResult};
