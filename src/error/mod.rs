//! Error handling for Ripple
//!
//! Error types, result aliases, and error context utilities.

pub mod context;
pub mod types;

pub use context::{handle_error, try_with_recovery, OptionExt, ResultExt};
pub use types::{ErrorSeverity, Result, RippleError};
