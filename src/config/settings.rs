//! Settings validation

use crate::error::{Result, RippleError};
use crate::models::config::Settings;
use std::path::Path;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if settings.extensions.is_empty() {
            return Err(RippleError::config_error("At least one file extension is required"));
        }
        if let Some(ext) = settings
            .extensions
            .iter()
            .find(|ext| ext.trim().trim_start_matches('.').is_empty())
        {
            return Err(RippleError::config_error(format!("Invalid extension: '{}'", ext)));
        }

        if settings.ignore_patterns.iter().any(|p| p.is_empty()) {
            return Err(RippleError::config_error("Ignore patterns must not be empty strings"));
        }

        if settings.read_workers == Some(0) {
            return Err(RippleError::config_error("read_workers must be at least 1"));
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// The scan root must be an existing directory
    pub fn validate_scan_path(settings: &Settings) -> Result<()> {
        if !settings.scan_path.is_dir() {
            return Err(RippleError::InvalidPath {
                path: settings.scan_path.clone(),
            });
        }
        Ok(())
    }

    /// Validate that an output path is writable
    fn validate_output_path(path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => return Ok(()),
        };

        if !parent.exists() {
            return Err(RippleError::InvalidPath {
                path: parent.to_path_buf(),
            });
        }

        let metadata = std::fs::metadata(parent).map_err(RippleError::io_error)?;
        if metadata.permissions().readonly() {
            return Err(RippleError::permission_denied(parent));
        }

        Ok(())
    }
}
