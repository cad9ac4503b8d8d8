//! Output formatting functionality
//!
//! This module provides formatters for different output formats.

use crate::error::{Result, RippleError};
use crate::models::analysis::{AnalysisRecord, RiskLevel};
use crate::models::dependency_graph::{DependencyGraph, GraphStatistics};
use crate::models::impact::{ImpactRecord, ImpactType};
use crate::models::plan::ChangePlan;
use crate::models::validation::ValidationResult;
use ansi_term::Colour::{Blue, Cyan, Green, Red, Yellow};
use ansi_term::Style;
use serde::Serialize;
use std::time::Duration;

/// Serializable view of a finished analysis run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport<'a> {
    pub statistics: GraphStatistics,
    pub records: Vec<&'a AnalysisRecord>,
    pub circular_dependencies: Vec<(String, String)>,
    pub errors: Vec<String>,
    pub duration_ms: u64,
}

impl<'a> AnalysisReport<'a> {
    pub fn new(graph: &'a DependencyGraph, errors: &[RippleError], duration: Duration) -> Self {
        Self {
            statistics: graph.statistics(),
            records: graph.records.values().collect(),
            circular_dependencies: graph.circular_dependencies().into_iter().collect(),
            errors: errors.iter().map(|e| e.to_string()).collect(),
            duration_ms: duration.as_millis() as u64,
        }
    }
}

/// Paint a risk level in its conventional colour
pub fn paint_risk(level: RiskLevel, use_colors: bool) -> String {
    let label = level.as_str().to_uppercase();
    if !use_colors {
        return label;
    }
    match level {
        RiskLevel::Critical => Red.bold().paint(label).to_string(),
        RiskLevel::High => Red.paint(label).to_string(),
        RiskLevel::Medium => Yellow.paint(label).to_string(),
        RiskLevel::Low => Green.paint(label).to_string(),
    }
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", Blue.bold().paint(text))
    } else {
        format!("{}\n", text)
    }
}

fn dimmed(text: &str, use_colors: bool) -> String {
    if use_colors {
        Style::new().dimmed().paint(text).to_string()
    } else {
        text.to_string()
    }
}

/// Format graph statistics as text
pub fn format_statistics_text(stats: &GraphStatistics, use_colors: bool) -> String {
    let mut output = String::new();

    output.push_str(&heading("Dependency Graph Summary", use_colors));
    output.push('\n');
    output.push_str(&format!("Files analyzed: {}\n", stats.total_nodes));
    output.push_str(&format!("Import edges: {}\n", stats.total_edges));
    output.push_str(&format!("Unresolved relative imports: {}\n", stats.unresolved_count));
    output.push_str(&format!("Circular dependencies: {}\n", stats.circular_count));

    if let Some(file) = &stats.max_fan_in_file {
        output.push_str(&format!("Most depended on: {} ({})\n", file, stats.max_fan_in));
    }
    if let Some(file) = &stats.max_fan_out_file {
        output.push_str(&format!("Most dependencies: {} ({})\n", file, stats.max_fan_out));
    }

    output.push_str("\nRisk Breakdown:\n");
    output.push_str(&format!("  {}: {}\n", paint_risk(RiskLevel::Critical, use_colors), stats.critical_risk));
    output.push_str(&format!("  {}: {}\n", paint_risk(RiskLevel::High, use_colors), stats.high_risk));
    output.push_str(&format!("  {}: {}\n", paint_risk(RiskLevel::Medium, use_colors), stats.medium_risk));
    output.push_str(&format!("  {}: {}\n", paint_risk(RiskLevel::Low, use_colors), stats.low_risk));

    output
}

/// Format a single record as one text line, with detail lines in verbose mode
pub fn format_record_text(record: &AnalysisRecord, use_colors: bool, verbose: bool) -> String {
    let mut output = format!(
        "  [{}] {}  {}\n",
        paint_risk(record.risk_level, use_colors),
        record.path,
        dimmed(
            &format!(
                "deps {} / dependents {} / exports {}",
                record.fan_out(),
                record.fan_in(),
                record.exports.len()
            ),
            use_colors
        ),
    );

    if verbose {
        for dep in &record.dependencies {
            output.push_str(&format!("      -> {}\n", dep));
        }
        for dependent in &record.dependents {
            output.push_str(&format!("      <- {}\n", dependent));
        }
        for export in &record.exports {
            let marker = if export.is_default { " (default)" } else { "" };
            output.push_str(&format!(
                "      export {} {}{} :{}\n",
                export.kind.keyword(),
                export.name,
                marker,
                export.line_number
            ));
        }
    }

    output
}

/// Format a full analysis report as text
pub fn format_report_text(report: &AnalysisReport<'_>, use_colors: bool, verbose: bool) -> String {
    let mut output = format_statistics_text(&report.statistics, use_colors);
    output.push_str(&format!("Analysis duration: {}ms\n", report.duration_ms));

    // Riskiest files first; BTreeMap order keeps ties stable
    let mut records = report.records.clone();
    records.sort_by(|a, b| b.risk_level.cmp(&a.risk_level));

    output.push('\n');
    output.push_str(&heading("Files", use_colors));
    for record in records {
        if !verbose && record.risk_level == RiskLevel::Low {
            continue;
        }
        output.push_str(&format_record_text(record, use_colors, verbose));
    }
    if !verbose && report.statistics.low_risk > 0 {
        output.push_str(&format!(
            "  {}\n",
            dimmed(
                &format!("{} low risk files hidden (use --verbose)", report.statistics.low_risk),
                use_colors
            )
        ));
    }

    if !report.circular_dependencies.is_empty() {
        output.push('\n');
        output.push_str(&heading("Circular Dependencies", use_colors));
        for (from, to) in &report.circular_dependencies {
            output.push_str(&format!("  {} -> {}\n", from, to));
        }
    }

    if !report.errors.is_empty() {
        let title = format!("Errors encountered: {}", report.errors.len());
        if use_colors {
            output.push_str(&format!("\n{}\n", Yellow.bold().paint(title)));
        } else {
            output.push_str(&format!("\n{}\n", title));
        }
        for error in &report.errors {
            output.push_str(&format!("  {}\n", error));
        }
    }

    output
}

fn paint_impact_type(impact_type: ImpactType, use_colors: bool) -> String {
    let label = impact_type.to_string();
    if !use_colors {
        return label;
    }
    match impact_type {
        ImpactType::Breaking => Red.bold().paint(label).to_string(),
        ImpactType::NonBreaking => Green.paint(label).to_string(),
        ImpactType::Unknown => Cyan.paint(label).to_string(),
    }
}

/// Format predicted impacts as text
pub fn format_impacts_text(target: &str, impacts: &[ImpactRecord], use_colors: bool) -> String {
    let mut output = heading(&format!("Impact of changing {}", target), use_colors);
    output.push('\n');

    if impacts.is_empty() {
        output.push_str("No dependent files are affected\n");
        return output;
    }

    for impact in impacts {
        output.push_str(&format!(
            "  {} [{}] {}\n    {}\n",
            paint_risk(impact.severity, use_colors),
            paint_impact_type(impact.impact_type, use_colors),
            impact.affected_file,
            dimmed(&impact.description, use_colors),
        ));
    }
    output.push_str(&format!("\n{} impact records\n", impacts.len()));

    output
}

fn push_section(output: &mut String, title: &str, entries: &[String], numbered: bool) {
    if entries.is_empty() {
        return;
    }
    output.push_str(&format!("\n{}:\n", title));
    for (idx, entry) in entries.iter().enumerate() {
        if numbered {
            output.push_str(&format!("  {}. {}\n", idx + 1, entry));
        } else {
            output.push_str(&format!("  - {}\n", entry));
        }
    }
}

/// Format a change plan as text
pub fn format_plan_text(plan: &ChangePlan, use_colors: bool, verbose: bool) -> String {
    let mut output = heading(&format!("Change plan {}", plan.id), use_colors);
    output.push('\n');
    output.push_str(&format!("Target: {}\n", plan.file_path));
    output.push_str(&format!("Change: {}\n", plan.change_type));
    if !plan.description.is_empty() {
        output.push_str(&format!("Description: {}\n", plan.description));
    }
    output.push_str(&format!("Risk: {}\n", paint_risk(plan.risk_level(), use_colors)));
    output.push_str(&format!("Status: {} (step: {})\n", plan.status, plan.current_step));
    if let Some(failure) = &plan.failure {
        let line = format!("Failure: {}", failure);
        if use_colors {
            output.push_str(&format!("{}\n", Red.paint(line)));
        } else {
            output.push_str(&format!("{}\n", line));
        }
    }
    if plan.requires_review() {
        let line = "This change needs review before it is applied";
        if use_colors {
            output.push_str(&format!("{}\n", Yellow.bold().paint(line)));
        } else {
            output.push_str(&format!("{}\n", line));
        }
    }

    push_section(&mut output, "Affected files", plan.affected_files(), false);
    push_section(&mut output, "Procedure", &plan.procedure, true);
    push_section(&mut output, "Risks", &plan.risks, false);
    push_section(&mut output, "Recommendations", &plan.recommendations, false);

    if verbose {
        push_section(&mut output, "Rollback plan", &plan.rollback_plan, true);
        push_section(&mut output, "Validation checks", &plan.validation_checks, false);
        output.push_str(&format!(
            "\nCreated: {}\nUpdated: {}\n",
            plan.created_at.to_rfc3339(),
            plan.updated_at.to_rfc3339()
        ));
    }

    output
}

/// Format a validation result as text
pub fn format_validation_text(path: &str, result: &ValidationResult, use_colors: bool) -> String {
    let verdict = if result.is_valid { "VALID" } else { "INVALID" };
    let verdict = match (use_colors, result.is_valid) {
        (true, true) => Green.bold().paint(verdict).to_string(),
        (true, false) => Red.bold().paint(verdict).to_string(),
        (false, _) => verdict.to_string(),
    };

    let mut output = format!("{}: {}\n", path, verdict);
    push_section(&mut output, "Errors", &result.errors, false);
    push_section(&mut output, "Warnings", &result.warnings, false);
    push_section(&mut output, "Recommendations", &result.recommendations, false);
    output
}

/// Serialize any value as pretty JSON
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| RippleError::JsonSerialize { source: e })
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| RippleError::io_error(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| RippleError::CsvSerialize { source: e })
}

/// Format analysis records as CSV, one row per file
pub fn format_records_csv(graph: &DependencyGraph) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    writer.write_record([
        "Path",
        "Risk",
        "Dependencies",
        "Dependents",
        "Exports",
        "Default Export",
        "Imports",
        "Unresolved Imports",
    ])?;

    for (path, record) in &graph.records {
        let unresolved = graph.unresolved_imports.get(path).map(|v| v.len()).unwrap_or(0);
        let default_export = record
            .default_export()
            .map(|e| e.name.clone())
            .unwrap_or_default();

        writer.write_record([
            path.clone(),
            record.risk_level.as_str().to_string(),
            record.fan_out().to_string(),
            record.fan_in().to_string(),
            record.exports.len().to_string(),
            default_export,
            record.imports.len().to_string(),
            unresolved.to_string(),
        ])?;
    }

    finish_csv(writer)
}

/// Format predicted impacts as CSV
pub fn format_impacts_csv(impacts: &[ImpactRecord]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["Affected File", "Impact Type", "Severity", "Description"])?;

    for impact in impacts {
        let impact_type = impact.impact_type.to_string();
        writer.write_record([
            impact.affected_file.as_str(),
            impact_type.as_str(),
            impact.severity.as_str(),
            impact.description.as_str(),
        ])?;
    }

    finish_csv(writer)
}

/// Format a plan as CSV with one row per entry of each section
pub fn format_plan_csv(plan: &ChangePlan) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["Plan", "Section", "Entry"])?;

    let sections: [(&str, &[String]); 6] = [
        ("affected_file", plan.affected_files()),
        ("procedure", &plan.procedure),
        ("risk", &plan.risks),
        ("recommendation", &plan.recommendations),
        ("rollback", &plan.rollback_plan),
        ("validation_check", &plan.validation_checks),
    ];

    writer.write_record([plan.id.as_str(), "status", plan.status.as_str()])?;
    writer.write_record([plan.id.as_str(), "current_step", plan.current_step.as_str()])?;
    for (section, entries) in sections {
        for entry in entries {
            writer.write_record([plan.id.as_str(), section, entry.as_str()])?;
        }
    }

    finish_csv(writer)
}

/// Format a validation result as CSV
pub fn format_validation_csv(path: &str, result: &ValidationResult) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["Path", "Kind", "Message"])?;

    for (kind, messages) in [
        ("error", &result.errors),
        ("warning", &result.warnings),
        ("recommendation", &result.recommendations),
    ] {
        for message in messages {
            writer.write_record([path, kind, message.as_str()])?;
        }
    }

    finish_csv(writer)
}

/// Format graph statistics as a two-column CSV
pub fn format_statistics_csv(stats: &GraphStatistics) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["Metric", "Value"])?;

    let rows = [
        ("total_nodes", stats.total_nodes.to_string()),
        ("total_edges", stats.total_edges.to_string()),
        ("unresolved_count", stats.unresolved_count.to_string()),
        ("circular_count", stats.circular_count.to_string()),
        ("max_fan_in", stats.max_fan_in.to_string()),
        ("max_fan_in_file", stats.max_fan_in_file.clone().unwrap_or_default()),
        ("max_fan_out", stats.max_fan_out.to_string()),
        ("max_fan_out_file", stats.max_fan_out_file.clone().unwrap_or_default()),
        ("low_risk", stats.low_risk.to_string()),
        ("medium_risk", stats.medium_risk.to_string()),
        ("high_risk", stats.high_risk.to_string()),
        ("critical_risk", stats.critical_risk.to_string()),
    ];
    for (metric, value) in rows {
        writer.write_record([metric, value.as_str()])?;
    }

    finish_csv(writer)
}
