//! Foundational data structures, error types, and chunk definitions.

pub mod chunks;
pub mod error;
pub mod models;
