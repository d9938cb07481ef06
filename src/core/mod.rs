//! Core types shared across the crate: the error enum and the
//! user-friendly reporting layer used by the CLI.

pub mod error;

pub use error::{ErrorContext, GraftError, user_friendly_error};

/// Convenience alias used throughout the merge and resolve stages.
pub type Result<T> = std::result::Result<T, GraftError>;
