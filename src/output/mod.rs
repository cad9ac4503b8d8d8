//! Output formatting and writing functionality

mod formatters;
mod progress;
mod writers;

pub use self::formatters::{paint_risk, AnalysisReport};
pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::config::OutputFormat;
use crate::models::dependency_graph::{DependencyGraph, GraphStatistics};
use crate::models::impact::ImpactRecord;
use crate::models::plan::ChangePlan;
use crate::models::validation::ValidationResult;

/// Trait for different output formatters
pub trait Formatter {
    /// Format a whole analysis run
    fn format_analysis(&self, report: &AnalysisReport<'_>, graph: &DependencyGraph) -> Result<String>;

    fn format_statistics(&self, stats: &GraphStatistics) -> Result<String>;

    fn format_impacts(&self, target: &str, impacts: &[ImpactRecord]) -> Result<String>;

    fn format_plan(&self, plan: &ChangePlan) -> Result<String>;

    fn format_validation(&self, path: &str, result: &ValidationResult) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format_analysis(&self, report: &AnalysisReport<'_>, _graph: &DependencyGraph) -> Result<String> {
        // Quiet mode: one summary line
        if self.quiet {
            let stats = &report.statistics;
            let mut output = format!(
                "Files: {}, Edges: {}, Critical: {}, High: {}, Medium: {}, Low: {}\n",
                stats.total_nodes,
                stats.total_edges,
                stats.critical_risk,
                stats.high_risk,
                stats.medium_risk,
                stats.low_risk
            );
            if !report.errors.is_empty() {
                output.push_str(&format!("Errors: {}\n", report.errors.len()));
            }
            return Ok(output);
        }

        Ok(formatters::format_report_text(report, self.use_colors, self.verbose))
    }

    fn format_statistics(&self, stats: &GraphStatistics) -> Result<String> {
        Ok(formatters::format_statistics_text(stats, self.use_colors))
    }

    fn format_impacts(&self, target: &str, impacts: &[ImpactRecord]) -> Result<String> {
        Ok(formatters::format_impacts_text(target, impacts, self.use_colors))
    }

    fn format_plan(&self, plan: &ChangePlan) -> Result<String> {
        Ok(formatters::format_plan_text(plan, self.use_colors, self.verbose))
    }

    fn format_validation(&self, path: &str, result: &ValidationResult) -> Result<String> {
        Ok(formatters::format_validation_text(path, result, self.use_colors))
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_analysis(&self, report: &AnalysisReport<'_>, _graph: &DependencyGraph) -> Result<String> {
        formatters::format_json(report)
    }

    fn format_statistics(&self, stats: &GraphStatistics) -> Result<String> {
        formatters::format_json(stats)
    }

    fn format_impacts(&self, _target: &str, impacts: &[ImpactRecord]) -> Result<String> {
        formatters::format_json(impacts)
    }

    fn format_plan(&self, plan: &ChangePlan) -> Result<String> {
        formatters::format_json(plan)
    }

    fn format_validation(&self, _path: &str, result: &ValidationResult) -> Result<String> {
        formatters::format_json(result)
    }
}

/// CSV formatter for spreadsheet analysis
pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format_analysis(&self, _report: &AnalysisReport<'_>, graph: &DependencyGraph) -> Result<String> {
        formatters::format_records_csv(graph)
    }

    fn format_statistics(&self, stats: &GraphStatistics) -> Result<String> {
        formatters::format_statistics_csv(stats)
    }

    fn format_impacts(&self, _target: &str, impacts: &[ImpactRecord]) -> Result<String> {
        formatters::format_impacts_csv(impacts)
    }

    fn format_plan(&self, plan: &ChangePlan) -> Result<String> {
        formatters::format_plan_csv(plan)
    }

    fn format_validation(&self, path: &str, result: &ValidationResult) -> Result<String> {
        formatters::format_validation_csv(path, result)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(format: OutputFormat, use_colors: bool, verbose: bool, quiet: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(use_colors, verbose, quiet)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}
