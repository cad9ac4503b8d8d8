//! Fixed text templates for change plans
//!
//! Content is keyed by change type, the target's risk level and its number
//! of dependents.

use crate::models::analysis::{AnalysisRecord, RiskLevel};
use crate::models::impact::{ImpactRecord, ImpactType};
use crate::models::plan::{ChangePlan, ChangeType, PlanContent, PlanStep};
use crate::utils::path_class::{is_api_path, is_shared_path};

/// Files with more dependents than this are called out as a wide blast radius
pub const WIDE_FAN_IN: usize = 5;

/// Build plan text for `record`; `class_path` is its path below the scan root
pub fn plan_content(
    change_type: ChangeType,
    record: &AnalysisRecord,
    class_path: &str,
    impacts: &[ImpactRecord],
) -> PlanContent {
    PlanContent {
        procedure: procedure(change_type, record),
        risks: risks(change_type, record, class_path, impacts),
        recommendations: recommendations(change_type, record),
        rollback_plan: rollback_plan(change_type, record),
        validation_checks: validation_checks(change_type, record, class_path),
    }
}

fn procedure(change_type: ChangeType, record: &AnalysisRecord) -> Vec<String> {
    let path = &record.path;
    let dependents = record.fan_in();

    let mut steps = vec![
        format!(
            "Review the impact analysis for {} ({} dependent file(s), {} risk)",
            path, dependents, record.risk_level
        ),
        format!("Back up {} and its direct dependents", path),
    ];

    match change_type {
        ChangeType::Modify => {
            steps.push(format!("Apply the modification to {}", path));
            if dependents > 0 {
                steps.push(format!(
                    "Update usages in {} dependent file(s) if exported signatures changed",
                    dependents
                ));
            }
        }
        ChangeType::Delete => {
            if dependents > 0 {
                steps.push(format!("Remove imports of {} from {} dependent file(s)", path, dependents));
            }
            steps.push(format!("Delete {}", path));
        }
        ChangeType::Rename => {
            steps.push(format!("Rename {}", path));
            steps.push(format!("Update import specifiers in {} dependent file(s)", dependents));
        }
        ChangeType::Move => {
            steps.push(format!("Move {} to its new location", path));
            steps.push(format!(
                "Update import specifiers in {} dependent file(s) and the relative imports inside the moved file",
                dependents
            ));
        }
        ChangeType::Add => {
            steps.push(format!("Add the new code next to {}", path));
            steps.push("Export the new symbols where consumers expect them".to_string());
        }
    }

    steps.push("Run type checking and the test suite".to_string());
    steps.push("Remove backups once validation passes".to_string());
    steps
}

fn rollback_plan(change_type: ChangeType, record: &AnalysisRecord) -> Vec<String> {
    let path = &record.path;
    let mut steps = Vec::new();

    match change_type {
        ChangeType::Delete => {
            steps.push(format!("Restore {} from backup", path));
            if record.fan_in() > 0 {
                steps.push(format!("Restore imports of {} in dependent files from backup", path));
            }
        }
        ChangeType::Rename | ChangeType::Move => {
            steps.push(format!("Restore {} at its original location", path));
            steps.push("Revert import specifier updates in dependent files".to_string());
        }
        ChangeType::Modify | ChangeType::Add => {
            steps.push(format!("Restore {} from backup", path));
        }
    }

    steps.push("Re-run the test suite to confirm the original state".to_string());
    steps
}

fn validation_checks(change_type: ChangeType, record: &AnalysisRecord, class_path: &str) -> Vec<String> {
    let path = &record.path;
    let mut checks = vec![
        "Type checking passes".to_string(),
        "Unit tests pass".to_string(),
    ];

    if record.fan_in() > 0 {
        checks.push(format!("All {} dependent file(s) still compile", record.fan_in()));
    }

    match change_type {
        ChangeType::Delete => checks.push(format!("No import still references {}", path)),
        ChangeType::Rename | ChangeType::Move => {
            checks.push("No import still references the old path".to_string())
        }
        ChangeType::Modify | ChangeType::Add => {}
    }

    if is_api_path(class_path) {
        checks.push("API responses are unchanged for existing consumers".to_string());
    }
    if record.risk_level.needs_review() {
        checks.push("A reviewer has signed off on the change".to_string());
    }

    checks
}

fn risks(change_type: ChangeType, record: &AnalysisRecord, class_path: &str, impacts: &[ImpactRecord]) -> Vec<String> {
    let mut risks = Vec::new();

    match record.risk_level {
        RiskLevel::Critical | RiskLevel::High => risks.push(format!(
            "{} risk file: {} dependent(s), {} dependency(ies), {} export(s)",
            capitalize(record.risk_level.as_str()),
            record.fan_in(),
            record.fan_out(),
            record.exports.len()
        )),
        RiskLevel::Medium | RiskLevel::Low => {}
    }

    let breaking = impacts
        .iter()
        .filter(|impact| impact.impact_type == ImpactType::Breaking)
        .count();
    if breaking > 0 {
        risks.push(format!("{} file(s) will break without follow-up edits", breaking));
    }

    if record.fan_in() > WIDE_FAN_IN {
        risks.push(format!("Wide blast radius: {} files import this file directly", record.fan_in()));
    }

    if is_shared_path(class_path) {
        risks.push("Shared utility: runtime call sites may exceed the static import graph".to_string());
    }
    if is_api_path(class_path) {
        risks.push("API surface: external consumers may depend on this contract".to_string());
    }

    if matches!(change_type, ChangeType::Rename | ChangeType::Move) && record.fan_out() > 0 {
        risks.push("Relative imports inside the file must still resolve after it moves".to_string());
    }

    risks
}

fn recommendations(change_type: ChangeType, record: &AnalysisRecord) -> Vec<String> {
    let mut recommendations = Vec::new();

    if record.risk_level.needs_review() {
        recommendations.push("Get a code review before executing this plan".to_string());
        recommendations.push("Split the change into smaller, independently testable steps".to_string());
    }

    match change_type {
        ChangeType::Delete if record.fan_in() > 0 => {
            recommendations.push("Deprecate the exports first and delete in a later change".to_string())
        }
        ChangeType::Rename | ChangeType::Move if record.fan_in() > 0 => recommendations
            .push("Re-export from the old path until every dependent is migrated".to_string()),
        _ => {}
    }

    if record.fan_in() == 0 {
        recommendations.push("No dependents found; the change is isolated".to_string());
    }

    recommendations.push("Run the full test suite after the change".to_string());
    recommendations
}

/// Actions a plan hands to the executor for one step
pub fn step_actions(plan: &ChangePlan, step: PlanStep) -> Vec<String> {
    let path = &plan.file_path;

    match step {
        PlanStep::Analysis => vec![format!(
            "Confirm impact analysis for {}: {} affected file(s), {} risk",
            path,
            plan.affected_files().len(),
            plan.risk_level()
        )],
        PlanStep::Backup => std::iter::once(path)
            .chain(plan.analysis.dependents.iter())
            .map(|file| format!("Back up {}", file))
            .collect(),
        PlanStep::Preparation => vec![format!("Prepare {} of {}", plan.change_type, path)],
        PlanStep::Execution => vec![format!(
            "Apply {} to {}: {}",
            plan.change_type, path, plan.description
        )],
        PlanStep::Validation => plan
            .validation_checks
            .iter()
            .map(|check| format!("Verify: {}", check))
            .collect(),
        PlanStep::Cleanup => vec![format!("Remove backups for {}", path)],
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
