//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::GlobalArgs;
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Settings-relevant command-line arguments
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub extensions: Option<Vec<String>>,
    pub ignore: Option<Vec<String>>,
    pub follow_links: bool,
    pub read_workers: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub config: Option<PathBuf>,
}

impl CliArgs {
    pub fn from_global(args: &GlobalArgs) -> Self {
        let non_empty = |values: &Vec<String>| (!values.is_empty()).then(|| values.clone());

        Self {
            path: args.path.clone(),
            extensions: non_empty(&args.extensions),
            ignore: non_empty(&args.ignore),
            follow_links: args.follow_links,
            read_workers: args.workers,
            output_format: args.output.map(Into::into),
            output_file: args.output_file.clone(),
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

    /// Create a CLI configuration source from parsed global flags
    pub fn from_args(args: &GlobalArgs) -> Self {
        Self::new(CliArgs::from_global(args))
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings {
            scan_path: self.args.path.clone(),
            extensions: self.args.extensions.clone(),
            ignore_patterns: self.args.ignore.clone(),
            read_workers: self.args.read_workers,
            output_format: self.args.output_format,
            output_file: self.args.output_file.clone(),
            ..Default::default()
        };

        // Flags only override when set
        if self.args.follow_links {
            settings.follow_links = Some(true);
        }
        if self.args.quiet {
            settings.quiet = Some(true);
        }
        if self.args.verbose {
            settings.verbose = Some(true);
        }
        if self.args.no_colors {
            settings.use_colors = Some(false);
        }
        if self.args.no_progress {
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
