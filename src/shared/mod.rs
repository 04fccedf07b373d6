//! Shared components - common types and errors

pub mod errors;
pub mod types;
