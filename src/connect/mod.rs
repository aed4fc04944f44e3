//! Links between chat users and accounts on external services.
//!
//! A user connects at most once per service, and an account identifier is
//! claimed by at most one user per service. Identifiers are checked against
//! the external service before they are stored.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
