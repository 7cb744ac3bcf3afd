//! Data models: the module/package/class graph and configuration

pub mod class;
pub mod config;
pub mod module;
pub mod package;
pub mod project;
pub mod ref_set;

pub use class::{ClassId, ClassNode, PackageId};
pub use config::{OutputFormat, PartialSettings, Settings};
pub use module::{AnalysisState, ModuleNode, ScanFailure};
pub use package::PackageNode;
pub use project::{DiscoveryFailure, ProjectNode};
pub use ref_set::RefSet;
