/// Identifiers, validated input and numeric helpers.
pub mod core;
/// Crate error type.
pub mod error;
