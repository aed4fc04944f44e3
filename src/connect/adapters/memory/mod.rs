//! In-memory adapters for the connect ports.

mod repository;
mod validator;

pub use repository::InMemoryConnectionRepository;
pub use validator::StaticIdentifierValidator;
