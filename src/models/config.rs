//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration settings for the analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Project root directory
    pub project_root: PathBuf,

    /// Explicit module directories; empty means "ask the build descriptor"
    pub modules: Vec<String>,

    /// Build descriptor file name inside the project root
    pub descriptor_file: String,

    /// Name of the canonical sources directory inside a module
    pub source_dir: String,

    /// Path below `source_dir` where package directories start
    pub source_root: String,

    /// Source file extension, without the dot
    pub source_extension: String,

    /// Package-level metadata file that is not a class
    pub package_info_file: String,

    /// Build output directory never treated as a module
    pub build_output_dir: String,

    /// Directories starting with this prefix are skipped
    pub special_prefix: String,

    /// Glob patterns for directory names to skip during module discovery
    pub exclude_patterns: Vec<String>,

    /// Whether to follow symbolic links during directory traversal
    pub follow_links: bool,

    /// Output format
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Module to render, as a slash-separated path such as `core/api`
    pub module: Option<String>,

    /// Whether to use parallel processing
    pub parallel: bool,

    /// Worker threads; defaults to the number of CPUs
    pub threads: Option<usize>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress bars
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            modules: Vec::new(),
            descriptor_file: "pom.xml".to_string(),
            source_dir: "src".to_string(),
            source_root: "main/java".to_string(),
            source_extension: "java".to_string(),
            package_info_file: "package-info.java".to_string(),
            build_output_dir: "target".to_string(),
            special_prefix: ".".to_string(),
            exclude_patterns: Vec::new(),
            follow_links: false,
            output_format: OutputFormat::Html,
            output_file: None,
            module: None,
            parallel: true,
            threads: None,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

impl Settings {
    /// Worker thread count to use when running in parallel
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Self-contained HTML matrix
    Html,
    /// Human-readable text summary
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV matrix for spreadsheet analysis
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSettings {
    pub project_root: Option<PathBuf>,
    pub modules: Option<Vec<String>>,
    pub descriptor_file: Option<String>,
    pub source_dir: Option<String>,
    pub source_root: Option<String>,
    pub source_extension: Option<String>,
    pub package_info_file: Option<String>,
    pub build_output_dir: Option<String>,
    pub special_prefix: Option<String>,
    pub exclude_patterns: Option<Vec<String>>,
    pub follow_links: Option<bool>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub module: Option<String>,
    pub parallel: Option<bool>,
    pub threads: Option<usize>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

macro_rules! merge_fields {
    ($target:expr, $other:expr, $($field:ident),+ $(,)?) => {
        $(
            if $other.$field.is_some() {
                $target.$field = $other.$field;
            }
        )+
    };
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        merge_fields!(
            self,
            other,
            project_root,
            modules,
            descriptor_file,
            source_dir,
            source_root,
            source_extension,
            package_info_file,
            build_output_dir,
            special_prefix,
            exclude_patterns,
            follow_links,
            output_format,
            output_file,
            module,
            parallel,
            threads,
            quiet,
            verbose,
            use_colors,
            show_progress,
        );
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let defaults = Settings::default();
        let other = self.clone();

        Settings {
            project_root: other.project_root.unwrap_or(defaults.project_root),
            modules: other.modules.unwrap_or(defaults.modules),
            descriptor_file: other.descriptor_file.unwrap_or(defaults.descriptor_file),
            source_dir: other.source_dir.unwrap_or(defaults.source_dir),
            source_root: other.source_root.unwrap_or(defaults.source_root),
            source_extension: other.source_extension.unwrap_or(defaults.source_extension),
            package_info_file: other.package_info_file.unwrap_or(defaults.package_info_file),
            build_output_dir: other.build_output_dir.unwrap_or(defaults.build_output_dir),
            special_prefix: other.special_prefix.unwrap_or(defaults.special_prefix),
            exclude_patterns: other.exclude_patterns.unwrap_or(defaults.exclude_patterns),
            follow_links: other.follow_links.unwrap_or(defaults.follow_links),
            output_format: other.output_format.unwrap_or(defaults.output_format),
            output_file: other.output_file.or(defaults.output_file),
            module: other.module.or(defaults.module),
            parallel: other.parallel.unwrap_or(defaults.parallel),
            threads: other.threads.or(defaults.threads),
            quiet: other.quiet.unwrap_or(defaults.quiet),
            verbose: other.verbose.unwrap_or(defaults.verbose),
            use_colors: other.use_colors.unwrap_or(defaults.use_colors),
            show_progress: other.show_progress.unwrap_or(defaults.show_progress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_round_trips_through_strings() {
        assert_eq!("HTML".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_to_settings_fills_defaults() {
        let partial = PartialSettings {
            source_root: Some("java".to_string()),
            threads: Some(3),
            ..Default::default()
        };
        let settings = partial.to_settings();

        assert_eq!(settings.source_root, "java");
        assert_eq!(settings.effective_threads(), 3);
        assert_eq!(settings.descriptor_file, "pom.xml");
        assert_eq!(settings.output_format, OutputFormat::Html);
    }
}
