//! Parsers for build descriptors and source-file imports

pub mod descriptor;
pub mod imports;

pub use descriptor::{create_descriptor, BuildDescriptor, PomDescriptor, StaticDescriptor};
pub use imports::{parse_import_line, scan_file, scan_source, ImportCandidate};
