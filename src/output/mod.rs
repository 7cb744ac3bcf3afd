//! Output formatting and writing functionality

mod formatters;
pub mod html;
pub mod keys;
mod progress;
mod writers;

pub use self::formatters::{module_paths, select_modules, ModuleReport, PackageReport, ProjectReport};
pub use self::keys::{decode_key, encode_key, parse_link, MAX_KEYS};
pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::config::{OutputFormat, Settings};
use crate::models::ProjectNode;

/// Trait for different output formatters
pub trait Formatter {
    /// Format an analysed project into a string
    fn format(&self, project: &ProjectNode) -> Result<String>;
}

/// HTML matrices, one section per module
pub struct HtmlFormatter {
    /// Slash-separated module path; every module when absent
    pub module: Option<String>,
}

impl HtmlFormatter {
    pub fn new(module: Option<String>) -> Self {
        Self { module }
    }
}

impl Formatter for HtmlFormatter {
    fn format(&self, project: &ProjectNode) -> Result<String> {
        let modules = select_modules(project, self.module.as_deref())?;
        let mut body = String::new();
        for (_, module) in &modules {
            body.push_str(&html::render_section(module)?);
        }
        Ok(html::document(&format!("Dependency matrix: {}", project.name), &body))
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub module: Option<String>,
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(module: Option<String>, use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            module,
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, project: &ProjectNode) -> Result<String> {
        let modules = select_modules(project, self.module.as_deref())?;

        // Quiet mode only reports what needs attention
        if self.quiet {
            let circular: usize = modules.iter().map(|(_, module)| module.circular_packages().count()).sum();
            let packages: usize = modules.iter().map(|(_, module)| module.packages.len()).sum();
            let mut output = format!("Packages: {}, circular: {}\n", packages, circular);
            if !project.failures.is_empty() {
                output.push_str(&format!("Discovery failures: {}\n", project.failures.len()));
            }
            return Ok(output);
        }

        formatters::format_project_text(project, &modules, self.use_colors, self.verbose)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pub module: Option<String>,
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(module: Option<String>, pretty: bool) -> Self {
        Self { module, pretty }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, project: &ProjectNode) -> Result<String> {
        let modules = select_modules(project, self.module.as_deref())?;
        formatters::format_project_json(project, &modules, self.pretty)
    }
}

/// CSV formatter for spreadsheet analysis
pub struct CsvFormatter {
    pub module: Option<String>,
}

impl CsvFormatter {
    /// Create a new CSV formatter
    pub fn new(module: Option<String>) -> Self {
        Self { module }
    }
}

impl Formatter for CsvFormatter {
    fn format(&self, project: &ProjectNode) -> Result<String> {
        let modules = select_modules(project, self.module.as_deref())?;
        formatters::format_project_csv(&modules)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(format: OutputFormat, settings: &Settings) -> Box<dyn Formatter> {
    let module = settings.module.clone();
    match format {
        OutputFormat::Html => Box::new(HtmlFormatter::new(module)),
        OutputFormat::Text => Box::new(TextFormatter::new(
            module,
            settings.use_colors,
            settings.verbose,
            settings.quiet,
        )),
        OutputFormat::Json => Box::new(JsonFormatter::new(module, true)),
        OutputFormat::Csv => Box::new(CsvFormatter::new(module)),
    }
}
