//! Impact records produced by change prediction

use super::analysis::RiskLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity shares the four-level scale used for risk
pub type Severity = RiskLevel;

/// Whether an affected file is expected to break
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ImpactType {
    Breaking,
    NonBreaking,
    Unknown,
}

impl fmt::Display for ImpactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImpactType::Breaking => write!(f, "breaking"),
            ImpactType::NonBreaking => write!(f, "non-breaking"),
            ImpactType::Unknown => write!(f, "unknown"),
        }
    }
}

/// One file affected by a prospective change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImpactRecord {
    pub affected_file: String,
    pub impact_type: ImpactType,
    pub description: String,
    pub severity: Severity,
}

/// Kinds of edit the impact predictor understands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Modify,
    Delete,
    Rename,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Modify => write!(f, "modify"),
            ChangeKind::Delete => write!(f, "delete"),
            ChangeKind::Rename => write!(f, "rename"),
        }
    }
}

impl std::str::FromStr for ChangeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "modify" => Ok(ChangeKind::Modify),
            "delete" => Ok(ChangeKind::Delete),
            "rename" => Ok(ChangeKind::Rename),
            _ => Err(format!("Invalid change kind: {}", s)),
        }
    }
}

/// Unique affected files in first-seen order
pub fn affected_files(impacts: &[ImpactRecord]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    impacts
        .iter()
        .filter(|impact| seen.insert(impact.affected_file.as_str()))
        .map(|impact| impact.affected_file.clone())
        .collect()
}
