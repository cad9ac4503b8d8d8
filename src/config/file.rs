//! Configuration file and environment sources

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{Result, RippleError};
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".ripple.toml";

/// Prefix of recognized environment variables
pub const ENV_PREFIX: &str = "RIPPLE";

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
            return Err(RippleError::ConfigNotFound {
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
/// Recognized: `<PREFIX>_SCAN_PATH`, `<PREFIX>_EXTENSIONS` and
/// `<PREFIX>_IGNORE` (comma separated), `<PREFIX>_READ_WORKERS`,
/// `<PREFIX>_OUTPUT_FORMAT`.
pub struct EnvConfig {
    prefix: String,
    name: String,
    lookup: Box<dyn Fn(&str) -> Option<String>>,
}

impl EnvConfig {
    /// Source reading the process environment
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::with_lookup(prefix, |key| std::env::var(key).ok())
    }

    /// Source reading variables through `lookup`
    pub fn with_lookup<F>(prefix: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
            lookup: Box::new(lookup),
        }
    }

    fn var(&self, suffix: &str) -> Option<String> {
        (self.lookup)(&format!("{}_{}", self.prefix, suffix)).filter(|v| !v.trim().is_empty())
    }

    fn list(&self, suffix: &str) -> Option<Vec<String>> {
        self.var(suffix).map(|value| {
            value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
    }
}

const ENV_KEYS: [&str; 5] = ["SCAN_PATH", "EXTENSIONS", "IGNORE", "READ_WORKERS", "OUTPUT_FORMAT"];

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if let Some(path) = self.var("SCAN_PATH") {
            settings.scan_path = Some(PathBuf::from(path));
        }

        settings.extensions = self.list("EXTENSIONS");
        settings.ignore_patterns = self.list("IGNORE");

        if let Some(workers) = self.var("READ_WORKERS") {
            let workers = workers.trim().parse().map_err(|_| {
                RippleError::config_error(format!("{}_READ_WORKERS must be a positive integer", self.prefix))
            })?;
            settings.read_workers = Some(workers);
        }

        if let Some(format) = self.var("OUTPUT_FORMAT") {
            let format = format
                .parse()
                .map_err(|_| RippleError::InvalidOutputFormat { format: format.clone() })?;
            settings.output_format = Some(format);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
