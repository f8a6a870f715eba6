//! Shared domain types and errors for the studyhub backend.

pub mod error;
pub mod types;
