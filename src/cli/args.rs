//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// dsm - dependency structure matrix for multi-module Java source trees
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dsm")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build a package dependency structure matrix for a multi-module Java project")]
#[command(long_about = "dsm walks a multi-module source tree laid out as <module>/src/main/java/<package>, \
reads the import lines of every class, and reports package-level coupling as a dependency structure matrix. \
Packages that others depend on are ordered first, and packages taking part in a cycle are flagged.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Analyze the project in the current directory (modules read from pom.xml)
    dsm

    # Analyze a specific project
    dsm --path ./shop

    # Analyze an explicit list of module directories
    dsm --path ./shop --module-list core,web

Output Options:
    # Matrix for one module only
    dsm --module core/api --output-file core-api.html

    # Classes behind one matrix cell (column B, row A)
    dsm --module core --drill-down B-A

    # Text summary with cycle groups
    dsm --output text --verbose

    # JSON or CSV for further processing
    dsm --output json
    dsm --output csv --output-file matrix.csv

Configuration:
    # Use a specific configuration file
    dsm --config ./dsm.toml

    # Create a default configuration file
    dsm --init
")]
pub struct Args {
    /// Project root directory
    #[arg(short, long, value_name = "PATH", help = "Project root to analyze (defaults to the current directory)")]
    pub path: Option<PathBuf>,

    /// Explicit module directories
    #[arg(long, value_name = "MODULES", value_delimiter = ',', help = "Comma-separated module directories relative to the root (overrides the build descriptor)")]
    pub module_list: Vec<String>,

    /// Module to render
    #[arg(short, long, value_name = "MODULE", help = "Slash-separated module path to render, e.g. core/api (defaults to every module)")]
    pub module: Option<String>,

    /// Drill into one matrix cell
    #[arg(short, long, value_name = "LINK", requires = "module", help = "Render the classes behind a matrix cell, given as <column key>-<row key> (requires --module)")]
    pub drill_down: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, help = "Output format: 'html' matrix, 'text' summary, 'json' report or 'csv' matrix (defaults to html)")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write output to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .dsm.toml in the current directory)")]
    pub config: Option<PathBuf>,

    /// Exclude directories matching these glob patterns
    #[arg(short, long, value_name = "PATTERN", help = "Glob patterns for directories never treated as modules (can be specified multiple times)")]
    pub exclude: Vec<String>,

    /// Worker threads
    #[arg(short, long, value_name = "N", help = "Number of worker threads (defaults to the number of CPUs)")]
    pub threads: Option<usize>,

    /// Disable parallel processing
    #[arg(long, help = "Disable parallel processing (scan modules and packages on one thread)")]
    pub no_parallel: bool,

    /// Follow symbolic links during directory traversal
    #[arg(long, help = "Follow symbolic links during directory traversal")]
    pub follow_links: bool,

    /// Suppress non-essential output
    #[arg(short, long, conflicts_with = "verbose", help = "Suppress non-essential output (only results and errors)")]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long, help = "Show detailed progress and debug information")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, help = "Disable progress bars (useful for CI environments)")]
    pub no_progress: bool,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.dsm.toml) in the current directory")]
    pub init: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Self-contained HTML matrix
    Html,
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV matrix for spreadsheet analysis
    Csv,
}

impl From<OutputFormat> for crate::models::config::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Html => Self::Html,
            OutputFormat::Text => Self::Text,
            OutputFormat::Json => Self::Json,
            OutputFormat::Csv => Self::Csv,
        }
    }
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
