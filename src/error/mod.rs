//! Error handling for the DSM analyzer
//!
//! Error types, the crate-wide result alias, and the context and recovery
//! helpers used by every pipeline phase.

pub mod context;
pub mod types;

pub use context::{handle_error, OptionExt, ResultExt};
pub use types::{DsmError, ErrorSeverity, Result};
