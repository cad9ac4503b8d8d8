//! Risk scoring for graph nodes

use crate::models::analysis::{AnalysisRecord, RiskLevel};
use crate::models::dependency_graph::DependencyGraph;
use crate::utils::path_class::{is_api_path, is_shared_path};
use crate::utils::path_resolver::strip_root;

/// Classifies files by fan-in, fan-out, export surface and location
///
/// Location bonuses look only at the path below the scan root.
///
/// score = dependencies + 2 * dependents + exports
///         + 5 for shared utility paths (`/utils/`, `/lib/`)
///         + 3 for API paths (`/api/`)
pub struct RiskScorer;

impl RiskScorer {
    pub const DEPENDENCY_WEIGHT: usize = 1;
    pub const DEPENDENT_WEIGHT: usize = 2;
    pub const EXPORT_WEIGHT: usize = 1;
    pub const SHARED_PATH_BONUS: usize = 5;
    pub const API_PATH_BONUS: usize = 3;

    pub const CRITICAL_THRESHOLD: usize = 20;
    pub const HIGH_THRESHOLD: usize = 15;
    pub const MEDIUM_THRESHOLD: usize = 10;

    /// Raw score from counts and a path
    pub fn score(dependencies: usize, dependents: usize, exports: usize, path: &str) -> usize {
        let mut score = dependencies * Self::DEPENDENCY_WEIGHT
            + dependents * Self::DEPENDENT_WEIGHT
            + exports * Self::EXPORT_WEIGHT;

        if is_shared_path(path) {
            score += Self::SHARED_PATH_BONUS;
        }
        if is_api_path(path) {
            score += Self::API_PATH_BONUS;
        }

        score
    }

    pub fn classify(score: usize) -> RiskLevel {
        if score >= Self::CRITICAL_THRESHOLD {
            RiskLevel::Critical
        } else if score >= Self::HIGH_THRESHOLD {
            RiskLevel::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Score a record; `root` is the scan-root key its path is relative to
    pub fn score_record(record: &AnalysisRecord, root: &str) -> usize {
        Self::score(
            record.dependencies.len(),
            record.dependents.len(),
            record.exports.len(),
            strip_root(&record.path, root),
        )
    }

    pub fn risk_level(record: &AnalysisRecord, root: &str) -> RiskLevel {
        Self::classify(Self::score_record(record, root))
    }

    /// Overwrite every record's risk level from its current graph data
    pub fn score_all(graph: &mut DependencyGraph) {
        let root = graph.root.clone();
        for record in graph.records.values_mut() {
            record.risk_level = Self::risk_level(record, &root);
        }
    }
}
