//! Blast-radius prediction over the reverse dependency graph

use crate::models::dependency_graph::DependencyGraph;
use crate::models::impact::{ChangeKind, ImpactRecord, ImpactType, Severity};

/// Walks dependents of a target to list affected files
///
/// The walk stops after two hops: direct dependents, then their dependents.
/// Output is not deduplicated; a file reachable along several paths appears
/// once per path.
pub struct ImpactPredictor;

impl ImpactPredictor {
    /// Impacts of applying `kind` to `target`; empty when `target` is unknown
    pub fn predict(target: &str, kind: ChangeKind, graph: &DependencyGraph) -> Vec<ImpactRecord> {
        let mut impacts = Vec::new();

        for direct in graph.dependents_of(target) {
            impacts.push(Self::direct_impact(target, direct, kind));
        }

        for direct in graph.dependents_of(target) {
            for indirect in graph.dependents_of(direct) {
                impacts.push(ImpactRecord {
                    affected_file: indirect.clone(),
                    impact_type: ImpactType::Unknown,
                    description: format!(
                        "Indirectly affected through {} which depends on {}",
                        direct, target
                    ),
                    severity: Severity::Low,
                });
            }
        }

        impacts
    }

    fn direct_impact(target: &str, dependent: &str, kind: ChangeKind) -> ImpactRecord {
        let (impact_type, severity, description) = match kind {
            ChangeKind::Delete => (
                ImpactType::Breaking,
                Severity::Critical,
                format!("Imports of {} in {} will break when it is deleted", target, dependent),
            ),
            ChangeKind::Rename => (
                ImpactType::Unknown,
                Severity::Medium,
                format!("Import paths in {} must be updated after {} is renamed", dependent, target),
            ),
            ChangeKind::Modify => (
                ImpactType::Unknown,
                Severity::Medium,
                format!("{} imports {}; review usages of changed exports", dependent, target),
            ),
        };

        ImpactRecord {
            affected_file: dependent.to_string(),
            impact_type,
            description,
            severity,
        }
    }
}
