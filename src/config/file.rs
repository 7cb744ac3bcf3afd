//! Configuration file and environment sources

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource, DEFAULT_CONFIG_FILE};
use crate::error::{DsmError, Result};
use crate::models::config::PartialSettings;

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
            // Above environment variables, below the command line
            priority: 20,
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
            priority: 20,
        }
    }

    /// Get the path of this configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(DsmError::ConfigNotFound {
                path: self.path.clone(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration source
///
/// Reads `<PREFIX>_PROJECT_ROOT`, `<PREFIX>_MODULES` and `<PREFIX>_EXCLUDE`
/// (comma-separated), `<PREFIX>_OUTPUT_FORMAT` and `<PREFIX>_THREADS`.
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

const ENV_KEYS: &[&str] = &["PROJECT_ROOT", "MODULES", "EXCLUDE", "OUTPUT_FORMAT", "THREADS"];

impl EnvConfig {
    /// Create a new environment variable configuration source
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            priority: 10,
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, key)).ok()
    }

    fn list(&self, key: &str) -> Option<Vec<String>> {
        self.var(key).map(|value| {
            value
                .split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect()
        })
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings {
            project_root: self.var("PROJECT_ROOT").map(PathBuf::from),
            modules: self.list("MODULES"),
            exclude_patterns: self.list("EXCLUDE"),
            ..Default::default()
        };

        if let Some(format) = self.var("OUTPUT_FORMAT") {
            let output_format = format
                .parse()
                .map_err(|_| DsmError::InvalidOutputFormat { format: format.clone() })?;
            settings.output_format = Some(output_format);
        }

        if let Some(threads) = self.var("THREADS") {
            let threads = threads.trim().parse().map_err(|_| {
                DsmError::config_error(format!("{}_THREADS must be a positive number, got '{}'", self.prefix, threads))
            })?;
            settings.threads = Some(threads);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
