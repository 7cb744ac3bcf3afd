//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use super::DEFAULT_CONFIG_FILE;
use crate::error::{DsmError, Result};
use crate::models::config::PartialSettings;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(DsmError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| DsmError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|source| DsmError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

fn invalid(path: &Path, message: impl std::fmt::Display) -> DsmError {
    DsmError::config_error(format!("{} in config file: {}", message, path.display()))
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(root) = &settings.project_root {
        if root.as_os_str().is_empty() {
            return Err(invalid(path, "Invalid empty project_root"));
        }
    }

    let names = [
        ("descriptor_file", &settings.descriptor_file),
        ("source_dir", &settings.source_dir),
        ("source_root", &settings.source_root),
        ("source_extension", &settings.source_extension),
        ("package_info_file", &settings.package_info_file),
        ("build_output_dir", &settings.build_output_dir),
        ("special_prefix", &settings.special_prefix),
    ];
    for (field, value) in names {
        if value.as_deref().is_some_and(str::is_empty) {
            return Err(invalid(path, format!("Invalid empty {}", field)));
        }
    }

    if let Some(extension) = &settings.source_extension {
        if extension.starts_with('.') {
            return Err(invalid(
                path,
                format!("source_extension '{}' must not start with a dot", extension),
            ));
        }
    }

    if let Some(modules) = &settings.modules {
        if modules.iter().any(|module| module.trim().is_empty()) {
            return Err(invalid(path, "Empty module name"));
        }
    }

    if let Some(patterns) = &settings.exclude_patterns {
        for pattern in patterns {
            if pattern.is_empty() {
                return Err(invalid(path, "Empty exclude pattern"));
            }

            glob::Pattern::new(pattern)
                .map_err(|e| invalid(path, format!("Invalid exclude pattern '{}' ({})", pattern, e)))?;
        }
    }

    if settings.threads == Some(0) {
        return Err(invalid(path, "Invalid threads 0 (must be at least 1)"));
    }

    if let Some(output_file) = &settings.output_file {
        if output_file.as_os_str().is_empty() {
            return Err(invalid(path, "Invalid empty output_file"));
        }
    }

    Ok(())
}

/// Find and load configuration from default locations
///
/// Looks in the working directory, then the home directory, then
/// `<config dir>/dsm/config.toml`.
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    let current_dir_config = PathBuf::from(DEFAULT_CONFIG_FILE);
    if current_dir_config.is_file() {
        return Ok(Some(parse_config_file(current_dir_config)?));
    }

    if let Some(home_dir) = dirs::home_dir() {
        let home_config = home_dir.join(DEFAULT_CONFIG_FILE);
        if home_config.is_file() {
            return Ok(Some(parse_config_file(home_config)?));
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let xdg_config = config_dir.join("dsm").join("config.toml");
        if xdg_config.is_file() {
            return Ok(Some(parse_config_file(xdg_config)?));
        }
    }

    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(DsmError::io_error)?;
        }
    }

    let default_config = include_str!("default_config.toml");

    fs::write(path, default_config).map_err(|source| DsmError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("created configuration file {}", path.display());
    Ok(())
}
