//! Command implementations

use std::sync::Arc;

use super::Args;
use crate::config::{load_config, CliArgs, ConfigSource, FileConfig};
use crate::core::Analyzer;
use crate::error::{DsmError, ErrorSeverity, OptionExt, Result};
use crate::models::{ProjectNode, Settings};
use crate::output::{create_formatter, create_progress_callback, create_writer, html, ProgressReporter};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Analyze the project and render the matrix
    Analyze(Args),
    /// Render the classes behind one matrix cell of a module
    DrillDown { args: Args, link: String },
    /// Initialize a default configuration file
    Init,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }

        match args.drill_down.clone() {
            Some(link) => Command::DrillDown { args, link },
            None => Command::Analyze(args),
        }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Analyze(args) => {
                let settings = load_config(CliArgs::from(args))?;
                let project = analyze(&settings)?;

                let formatter = create_formatter(settings.output_format, &settings);
                let output = formatter.format(&project)?;

                let writer = create_writer(settings.output_file.as_ref());
                writer.write(&output)?;
                tracing::debug!("report written to {}", writer.destination());
                Ok(())
            }
            Command::DrillDown { args, link } => {
                let settings = load_config(CliArgs::from(args))?;
                let module_path = settings
                    .module
                    .clone()
                    .ok_or_error(|| DsmError::config_error("--drill-down needs a module, pass --module"))?;

                let project = analyze(&settings)?;
                let module = project
                    .find_module(&module_path)
                    .ok_or_error(|| DsmError::UnknownModule { name: module_path.clone() })?;

                let body = html::render_link(module, link)?;
                let output = html::document(&format!("{} {}", module_path, link), &body);

                create_writer(settings.output_file.as_ref()).write(&output)
            }
            Command::Init => {
                let file_config = FileConfig::new();

                if file_config.is_available() {
                    println!("Configuration file already exists at: {}", file_config.path().display());
                    println!("To overwrite it, delete the file first and run this command again.");
                    return Ok(());
                }

                file_config.create_default()?;

                println!("Created default configuration file at: {}", file_config.path().display());
                println!("Every setting is commented out; uncomment the ones you want to change.");
                Ok(())
            }
        }
    }

    /// Run the command and map the outcome to a process exit code
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(()) => 0,
            Err(err) => {
                eprintln!("{}: {}", err.severity(), err.user_message());

                match err.severity() {
                    ErrorSeverity::Warning => 0,
                    ErrorSeverity::Error => 1,
                    ErrorSeverity::Critical => 2,
                }
            }
        }
    }
}

/// Analyze the configured project, drawing progress on stderr
fn analyze(settings: &Settings) -> Result<ProjectNode> {
    let analyzer = Analyzer::new(settings.clone());

    if settings.quiet || !settings.show_progress {
        return analyzer.analyze();
    }

    let reporter = Arc::new(ProgressReporter::new(settings.quiet, settings.verbose));
    reporter.start(0, &format!("Analyzing {}", settings.project_root.display()));

    let result = analyzer.analyze_with_progress(create_progress_callback(reporter.clone()));
    match &result {
        Ok(project) => reporter.finish(&format!(
            "{} module(s), {} package(s)",
            project.all_modules().len(),
            project.package_count()
        )),
        Err(_) => reporter.finish("Analysis failed"),
    }
    result
}
