//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::Args;
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Command-line arguments that feed settings
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub modules: Option<Vec<String>>,
    pub module: Option<String>,
    pub exclude: Option<Vec<String>>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub threads: Option<usize>,
    pub no_parallel: bool,
    pub follow_links: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub config: Option<PathBuf>,
}

impl From<&Args> for CliArgs {
    fn from(args: &Args) -> Self {
        let non_empty = |values: &Vec<String>| if values.is_empty() { None } else { Some(values.clone()) };
        Self {
            path: args.path.clone(),
            modules: non_empty(&args.module_list),
            module: args.module.clone(),
            exclude: non_empty(&args.exclude),
            output_format: args.output.map(OutputFormat::from),
            output_file: args.output_file.clone(),
            threads: args.threads,
            no_parallel: args.no_parallel,
            follow_links: args.follow_links,
            quiet: args.quiet,
            verbose: args.verbose,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30,
        }
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;
        let mut settings = PartialSettings {
            project_root: args.path.clone(),
            modules: args.modules.clone(),
            module: args.module.clone(),
            exclude_patterns: args.exclude.clone(),
            output_format: args.output_format,
            output_file: args.output_file.clone(),
            threads: args.threads,
            ..Default::default()
        };

        // Flags only ever switch a default off (or on), never back
        if args.no_parallel {
            settings.parallel = Some(false);
        }
        if args.follow_links {
            settings.follow_links = Some(true);
        }
        if args.quiet {
            settings.quiet = Some(true);
        }
        if args.verbose {
            settings.verbose = Some(true);
        }
        if args.no_colors {
            settings.use_colors = Some(false);
        }
        if args.no_progress {
            settings.show_progress = Some(false);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
