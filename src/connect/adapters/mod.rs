//! Adapter implementations for the connect ports.

pub mod memory;
pub mod postgres;

mod codewars;

pub use codewars::{CODEWARS_API_URL, CodewarsClient};
