//! Core pipeline: discovery, scanning, closure and ordering

pub mod analyzer;
pub mod closure;
pub mod cycles;
pub mod discovery;
pub mod ordering;
pub mod parallel;
pub mod resolver;
pub mod scanner;

pub use analyzer::{analyze_module, Analyzer};
pub use closure::{close_module, implied_references};
pub use cycles::{cycle_groups, CycleGroup};
pub use discovery::{DiscoveryOptions, Discoverer};
pub use ordering::{compare_packages, order_module, presentation_order};
pub use parallel::{CancellationToken, ProgressUpdate};
pub use resolver::ResolutionIndex;
pub use scanner::{finalize_references, scan_module, scan_package, PackageScan};
