/// Shared identifiers and time helpers.
pub mod core;
/// Crate error type.
pub mod error;
