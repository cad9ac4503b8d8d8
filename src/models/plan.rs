//! Change plan data structures

use super::analysis::{AnalysisRecord, RiskLevel};
use super::impact::{affected_files, ChangeKind, ImpactRecord, ImpactType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of edit a change plan describes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Modify,
    Delete,
    Rename,
    Move,
    Add,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Modify => "modify",
            ChangeType::Delete => "delete",
            ChangeType::Rename => "rename",
            ChangeType::Move => "move",
            ChangeType::Add => "add",
        }
    }

    /// Kind used for impact prediction
    pub fn impact_kind(&self) -> ChangeKind {
        match self {
            ChangeType::Delete => ChangeKind::Delete,
            ChangeType::Rename | ChangeType::Move => ChangeKind::Rename,
            ChangeType::Modify | ChangeType::Add => ChangeKind::Modify,
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ChangeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "modify" => Ok(ChangeType::Modify),
            "delete" => Ok(ChangeType::Delete),
            "rename" => Ok(ChangeType::Rename),
            "move" => Ok(ChangeType::Move),
            "add" => Ok(ChangeType::Add),
            _ => Err(format!("Invalid change type: {}", s)),
        }
    }
}

/// Lifecycle status of a plan
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    RolledBack,
}

impl PlanStatus {
    /// No transition leaves a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlanStatus::Completed | PlanStatus::RolledBack)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Pending => "pending",
            PlanStatus::InProgress => "in_progress",
            PlanStatus::Completed => "completed",
            PlanStatus::Failed => "failed",
            PlanStatus::RolledBack => "rolled_back",
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-step of an in-progress plan, in execution order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlanStep {
    Analysis,
    Backup,
    Preparation,
    Execution,
    Validation,
    Cleanup,
}

impl PlanStep {
    pub const SEQUENCE: [PlanStep; 6] = [
        PlanStep::Analysis,
        PlanStep::Backup,
        PlanStep::Preparation,
        PlanStep::Execution,
        PlanStep::Validation,
        PlanStep::Cleanup,
    ];

    /// Following step, or None after cleanup
    pub fn next(&self) -> Option<PlanStep> {
        match self {
            PlanStep::Analysis => Some(PlanStep::Backup),
            PlanStep::Backup => Some(PlanStep::Preparation),
            PlanStep::Preparation => Some(PlanStep::Execution),
            PlanStep::Execution => Some(PlanStep::Validation),
            PlanStep::Validation => Some(PlanStep::Cleanup),
            PlanStep::Cleanup => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStep::Analysis => "analysis",
            PlanStep::Backup => "backup",
            PlanStep::Preparation => "preparation",
            PlanStep::Execution => "execution",
            PlanStep::Validation => "validation",
            PlanStep::Cleanup => "cleanup",
        }
    }
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A staged, rollback-capable description of one edit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePlan {
    pub id: String,
    pub file_path: String,
    pub change_type: ChangeType,
    pub description: String,
    pub status: PlanStatus,
    pub current_step: PlanStep,
    pub analysis: AnalysisRecord,
    pub impacts: Vec<ImpactRecord>,
    pub procedure: Vec<String>,
    pub risks: Vec<String>,
    pub recommendations: Vec<String>,
    affected_files: Vec<String>,
    pub rollback_plan: Vec<String>,
    pub validation_checks: Vec<String>,
    /// Message of the step failure that put the plan in `failed`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything a plan is built from, minus its lifecycle fields
#[derive(Debug, Clone)]
pub struct PlanContent {
    pub procedure: Vec<String>,
    pub risks: Vec<String>,
    pub recommendations: Vec<String>,
    pub rollback_plan: Vec<String>,
    pub validation_checks: Vec<String>,
}

impl ChangePlan {
    /// New plan in `pending` at the `analysis` step
    pub fn new(
        id: impl Into<String>,
        change_type: ChangeType,
        description: impl Into<String>,
        analysis: AnalysisRecord,
        impacts: Vec<ImpactRecord>,
        content: PlanContent,
    ) -> Self {
        let now = Utc::now();
        let affected_files = affected_files(&impacts);
        Self {
            id: id.into(),
            file_path: analysis.path.clone(),
            change_type,
            description: description.into(),
            status: PlanStatus::Pending,
            current_step: PlanStep::Analysis,
            analysis,
            impacts,
            procedure: content.procedure,
            risks: content.risks,
            recommendations: content.recommendations,
            affected_files,
            rollback_plan: content.rollback_plan,
            validation_checks: content.validation_checks,
            failure: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Deduplicated files named by `impacts`
    pub fn affected_files(&self) -> &[String] {
        &self.affected_files
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.analysis.risk_level
    }

    pub fn has_breaking_impacts(&self) -> bool {
        self.impacts
            .iter()
            .any(|impact| impact.impact_type == ImpactType::Breaking)
    }

    /// True when a person should look at the plan before it runs
    pub fn requires_review(&self) -> bool {
        self.risk_level().needs_review() || self.has_breaking_impacts()
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
