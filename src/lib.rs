//! dsm - a Dependency Structure Matrix analyzer for multi-module Java source trees
//!
//! The library discovers modules and packages under a project root, resolves
//! the import lines of every class to classes of the same module, closes the
//! package dependency relation transitively, orders packages so that
//! dependencies come first, and renders the result as an HTML matrix (or as
//! text, JSON or CSV).

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod parsers;

// Re-export commonly used types
pub use crate::core::{Analyzer, CancellationToken, CycleGroup};
pub use error::{DsmError, ErrorSeverity, OptionExt, Result, ResultExt};
pub use models::{ClassNode, ModuleNode, PackageNode, ProjectNode, Settings};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
