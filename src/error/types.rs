//! Error types and definitions for the DSM analyzer
//!
//! Failures are grouped by how far they are allowed to travel: scan errors are
//! absorbed per class, discovery errors drop a single module, and descriptor or
//! configuration errors abort the whole run.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for DSM operations
#[derive(Debug, Error)]
pub enum DsmError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// A module directory could not be listed or read
    #[error("Discovery error for {path}: {message}")]
    Discovery { path: PathBuf, message: String },

    /// A source file could not be opened or read while scanning imports
    #[error("Scan error in {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The build descriptor is unreadable or malformed
    #[error("Build descriptor error in {path}: {message}")]
    Descriptor { path: PathBuf, message: String },

    /// More rows than the two-letter key scheme can label
    #[error("Key index {index} exceeds the key scheme limit of {limit}")]
    EncodingLimit { index: usize, limit: usize },

    /// A matrix key that does not decode
    #[error("Invalid matrix key: {key}")]
    InvalidKey { key: String },

    /// A drill-down link that is not of the form `<ColumnKey>-<RowKey>`
    #[error("Invalid drill-down link: {link}")]
    InvalidLink { link: String },

    /// No module with this path exists in the project
    #[error("Unknown module: {name}")]
    UnknownModule { name: String },

    /// No package at this matrix position
    #[error("Unknown package at position {index} in module {module}")]
    UnknownPackage { module: String, index: usize },

    /// The analysis was cancelled before every module completed
    #[error("Analysis cancelled after {completed_modules} module(s)")]
    Cancelled { completed_modules: usize },

    /// Contextualised analysis failure
    #[error("Analysis error: {message}")]
    Analysis { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
    },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Invalid output format
    #[error("Invalid output format: {format}")]
    InvalidOutputFormat { format: String },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// CSV buffer was not valid UTF-8
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Parallel execution error
    #[error("Parallel execution error: {message}")]
    ParallelExecution { message: String },
}

impl DsmError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - operation can continue
            DsmError::Scan { .. } => ErrorSeverity::Warning,
            DsmError::PermissionDenied { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            DsmError::Descriptor { .. } => ErrorSeverity::Critical,
            DsmError::Cancelled { .. } => ErrorSeverity::Critical,
            DsmError::Config { .. } => ErrorSeverity::Critical,
            DsmError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            DsmError::ConfigRead { .. } => ErrorSeverity::Critical,
            DsmError::ConfigParse { .. } => ErrorSeverity::Critical,
            DsmError::TomlParse { .. } => ErrorSeverity::Critical,
            DsmError::InvalidOutputFormat { .. } => ErrorSeverity::Critical,
            DsmError::StdoutWrite { .. } => ErrorSeverity::Critical,

            // Regular errors - current operation fails but overall process can continue
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            DsmError::Discovery { path, message } => {
                format!("Could not read module directory '{}': {}. The module was skipped.", path.display(), message)
            }
            DsmError::Scan { path, source } => {
                format!("Could not read source file '{}': {}. The file was treated as having no imports.", path.display(), source)
            }
            DsmError::Descriptor { path, message } => {
                format!("The build descriptor '{}' could not be used: {}. Fix the descriptor or pass the module list explicitly.", path.display(), message)
            }
            DsmError::EncodingLimit { index, limit } => {
                format!("The module has more than {} packages (position {} has no key). Split the module or render a sub-module.", limit, index)
            }
            DsmError::InvalidKey { key } => {
                format!("'{}' is not a matrix key. Keys are one or two upper-case letters such as 'B' or 'AC'.", key)
            }
            DsmError::InvalidLink { link } => {
                format!("'{}' is not a drill-down link. Use the form COLUMN-ROW, for example 'B-A'.", link)
            }
            DsmError::UnknownModule { name } => {
                format!("No module named '{}' was found in the project.", name)
            }
            DsmError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions.", path.display())
            }
            DsmError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            DsmError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Create it with --init or pass --config.", path.display())
            }
            DsmError::OutputWrite { path, source } => {
                format!("Could not write the report to '{}': {}.", path.display(), source)
            }
            DsmError::Cancelled { completed_modules } => {
                format!("Analysis was cancelled; {} module(s) had completed. No report was produced.", completed_modules)
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Create an IO error
    pub fn io_error(source: std::io::Error) -> Self {
        DsmError::Io { source }
    }

    /// Create a discovery error for a module directory
    pub fn discovery_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DsmError::Discovery {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a scan error for a single source file
    pub fn scan_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DsmError::Scan {
            path: path.into(),
            source,
        }
    }

    /// Create a build descriptor error
    pub fn descriptor_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        DsmError::Descriptor {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        DsmError::Config {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        DsmError::PermissionDenied { path: path.into() }
    }

    /// Create a contextualised analysis error
    pub fn analysis_error(message: impl Into<String>) -> Self {
        DsmError::Analysis {
            message: message.into(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for DsmError {
    fn from(err: std::io::Error) -> Self {
        DsmError::io_error(err)
    }
}

impl From<toml::de::Error> for DsmError {
    fn from(err: toml::de::Error) -> Self {
        DsmError::TomlParse { source: err }
    }
}

impl From<csv::Error> for DsmError {
    fn from(err: csv::Error) -> Self {
        DsmError::Csv { source: err }
    }
}

impl From<glob::PatternError> for DsmError {
    fn from(err: glob::PatternError) -> Self {
        DsmError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for DsmError {
    fn from(err: serde_json::Error) -> Self {
        DsmError::JsonSerialize { source: err }
    }
}

impl<W> From<csv::IntoInnerError<W>> for DsmError {
    fn from(err: csv::IntoInnerError<W>) -> Self {
        DsmError::Csv {
            source: csv::Error::from(err.into_error()),
        }
    }
}

/// Result type alias for DSM operations
pub type Result<T> = std::result::Result<T, DsmError>;
