//! Configuration management
//!
//! Settings are layered: defaults, then a TOML file, then `DSM_*`
//! environment variables, then command-line arguments.

pub mod cli;
pub mod file;
pub mod parser;
pub mod settings;
#[cfg(test)]
pub mod tests;

use crate::error::Result;
use crate::models::config::{PartialSettings, Settings};

pub use cli::{CliArgs, CliConfig};
pub use file::{EnvConfig, FileConfig};
pub use parser::{create_default_config, find_default_config, parse_config_content, parse_config_file};
pub use settings::SettingsValidator;

/// Default configuration file name, looked up in the working directory and home
pub const DEFAULT_CONFIG_FILE: &str = ".dsm.toml";

/// Prefix of the environment variables read by [`EnvConfig`]
pub const ENV_PREFIX: &str = "DSM";

/// Trait for configuration sources
pub trait ConfigSource {
    /// Load configuration from this source
    fn load(&self) -> Result<PartialSettings>;

    /// Check if this configuration source is available
    fn is_available(&self) -> bool;

    /// Get the name of this configuration source for logging
    fn name(&self) -> &str;

    /// Get the priority of this source (higher numbers take precedence)
    fn priority(&self) -> u8 {
        10
    }
}

/// Configuration builder for merging multiple sources.
///
/// Explicit merges form the base. Sources are layered on top of it in
/// priority order when the settings are built, whatever order they were
/// loaded in.
pub struct ConfigBuilder {
    partial: PartialSettings,
    layers: Vec<(u8, PartialSettings)>,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self {
            partial: PartialSettings::default(),
            layers: Vec::new(),
        }
    }

    /// Merge settings from a partial configuration
    pub fn merge(mut self, partial: PartialSettings) -> Self {
        self.partial.merge_from(partial);
        self
    }

    fn layer(mut self, priority: u8, partial: PartialSettings) -> Self {
        self.layers.push((priority, partial));
        self
    }

    /// Load and merge settings from a configuration source
    pub fn load_from<S: ConfigSource>(self, source: &S) -> Result<Self> {
        if source.is_available() {
            tracing::debug!("loading configuration from {}", source.name());
            let partial = source.load()?;
            Ok(self.layer(source.priority(), partial))
        } else {
            Ok(self)
        }
    }

    /// Try to load from a source, ignoring it if unavailable or broken
    pub fn try_load_from<S: ConfigSource>(self, source: &S) -> Self {
        if !source.is_available() {
            return self;
        }
        match source.load() {
            Ok(partial) => self.layer(source.priority(), partial),
            Err(err) => {
                tracing::warn!("ignoring configuration from {}: {}", source.name(), err);
                self
            }
        }
    }

    /// Add configuration from a file that must exist
    pub fn add_config_file(self, path: &std::path::Path) -> Result<Self> {
        let file_config = FileConfig::with_path(path.to_path_buf());
        if !file_config.is_available() {
            return Err(crate::error::DsmError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        self.load_from(&file_config)
    }

    /// Try to add configuration from the default config file
    pub fn try_add_default_config_file(self) -> Self {
        match parser::find_default_config() {
            Ok(Some(default_config)) => {
                let priority = FileConfig::new().priority();
                self.layer(priority, default_config)
            }
            Ok(None) => self,
            Err(err) => {
                tracing::warn!("ignoring default configuration file: {}", err);
                self
            }
        }
    }

    /// Build the final settings with validation
    pub fn build(self) -> Result<Settings> {
        let mut partial = self.partial;
        let mut layers = self.layers;
        // Lower priorities first so higher ones overwrite them
        layers.sort_by_key(|(priority, _)| *priority);
        for (_, layer) in layers {
            partial.merge_from(layer);
        }

        let settings = partial.to_settings();
        settings::SettingsValidator::validate(&settings)?;
        Ok(settings)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration from every source with the standard precedence
pub fn load_config(cli_args: CliArgs) -> Result<Settings> {
    load_config_with_env_prefix(cli_args, ENV_PREFIX)
}

/// Load configuration with a custom environment variable prefix
pub fn load_config_with_env_prefix(cli_args: CliArgs, env_prefix: &str) -> Result<Settings> {
    let builder = match &cli_args.config {
        Some(path) => ConfigBuilder::new().add_config_file(path)?,
        None => ConfigBuilder::new().try_add_default_config_file(),
    };

    builder
        .try_load_from(&EnvConfig::new(env_prefix))
        .load_from(&CliConfig::new(cli_args))?
        .build()
}
