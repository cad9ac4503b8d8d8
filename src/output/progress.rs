//! Progress reporting functionality
//!
//! Progress bars go to stderr so piped stdout stays clean. Quiet mode and
//! disabled progress create no bars at all.

use crate::core::parallel::ProgressUpdate;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

/// Progress reporter for long-running operations
pub struct ProgressReporter {
    quiet: bool,
    verbose: bool,
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self::with_bar(quiet, verbose, !quiet)
    }

    /// Reporter that draws a bar only when `show_progress` is set and not quiet
    pub fn with_bar(quiet: bool, verbose: bool, show_progress: bool) -> Self {
        let bar = (!quiet && show_progress).then(|| {
            let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
            // Static template
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-");
            bar.set_style(style);
            bar
        });

        Self { quiet, verbose, bar }
    }

    /// Reporter that never draws or prints
    pub fn hidden() -> Self {
        Self {
            quiet: true,
            verbose: false,
            bar: None,
        }
    }

    /// Start a new progress operation
    pub fn start(&self, total: usize, operation: &str) {
        if let Some(bar) = &self.bar {
            bar.reset();
            bar.set_length(total as u64);
            bar.set_position(0);
            bar.set_message(operation.to_string());
            bar.enable_steady_tick(Duration::from_millis(100));
        }
    }

    /// Update progress
    pub fn update(&self, current: usize, total: usize, message: &str) {
        if let Some(bar) = &self.bar {
            bar.set_length(total as u64);
            bar.set_position(current as u64);
            bar.set_message(message.to_string());
        } else if self.verbose && !self.quiet {
            eprintln!("[{}/{}] {}", current, total, message);
        }
    }

    /// Update progress from a ProgressUpdate
    pub fn update_from(&self, progress: ProgressUpdate) {
        self.update(progress.current, progress.total, &progress.message);
    }

    /// Finish the progress operation
    pub fn finish(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
        if self.verbose && !self.quiet {
            eprintln!("{}", message);
        }
    }

    /// Print a status line to stderr (respects quiet mode)
    pub fn print(&self, message: &str) {
        if !self.quiet {
            match &self.bar {
                Some(bar) => bar.suspend(|| eprintln!("{}", message)),
                None => eprintln!("{}", message),
            }
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn has_bar(&self) -> bool {
        self.bar.is_some()
    }
}

/// Create a progress callback function that updates a ProgressReporter
pub fn create_progress_callback(reporter: Arc<ProgressReporter>) -> impl Fn(ProgressUpdate) + Send + Sync {
    move |progress: ProgressUpdate| {
        reporter.update_from(progress);
    }
}
