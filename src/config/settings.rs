//! Validation of fully merged settings

use std::path::Path;

use crate::error::{DsmError, Result, ResultExt};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.project_root.is_dir() {
            return Err(DsmError::InvalidPath {
                path: settings.project_root.clone(),
            });
        }

        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern).with_context(|| format!("Invalid exclude pattern: {}", pattern))?;
        }

        if settings.threads == Some(0) {
            return Err(DsmError::config_error("Thread count must be at least 1"));
        }

        if settings.source_extension.is_empty() || settings.source_extension.starts_with('.') {
            return Err(DsmError::config_error(format!(
                "Source extension '{}' must be non-empty and given without a leading dot",
                settings.source_extension
            )));
        }

        if settings.quiet && settings.verbose {
            return Err(DsmError::config_error("quiet and verbose cannot both be enabled"));
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// Validate that an output path has a writable parent directory
    fn validate_output_path(path: &Path) -> Result<()> {
        let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) else {
            return Ok(());
        };

        if !parent.is_dir() {
            return Err(DsmError::InvalidPath {
                path: parent.to_path_buf(),
            });
        }

        let metadata = std::fs::metadata(parent).map_err(DsmError::io_error)?;
        if metadata.permissions().readonly() {
            return Err(DsmError::permission_denied(parent));
        }

        Ok(())
    }
}
