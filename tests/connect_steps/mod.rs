//! Step definitions for connect scenarios.

pub mod given;
pub mod when;
pub mod world;
