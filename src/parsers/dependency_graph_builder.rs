//! Dependency graph construction from per-file analysis records

use crate::models::analysis::{AnalysisRecord, ImportKind};
use crate::models::config::Settings;
use crate::models::dependency_graph::{DependencyGraph, UnresolvedImport};
use crate::utils::path_resolver::PathResolver;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::debug;

/// Configuration for dependency graph building
#[derive(Debug, Clone)]
pub struct GraphBuilderConfig {
    /// Extensions probed when a specifier omits one, in order
    pub extensions: Vec<String>,
}

impl Default for GraphBuilderConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl GraphBuilderConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            extensions: settings.normalized_extensions(),
        }
    }
}

/// Builds the dependency graph once every record of a run is available
///
/// Pass 1 resolves each record's relative imports into `dependencies` and
/// collects the inverse relation alongside. Pass 2 writes `dependents` from
/// that inverse only after pass 1 has seen every record.
pub struct DependencyGraphBuilder {
    config: GraphBuilderConfig,
}

impl DependencyGraphBuilder {
    pub fn new(config: GraphBuilderConfig) -> Self {
        Self { config }
    }

    /// Build the graph, recomputing both edge directions from scratch
    pub fn build(&self, mut records: BTreeMap<String, AnalysisRecord>) -> DependencyGraph {
        let known: HashSet<String> = records.keys().cloned().collect();
        let resolver = PathResolver::new(&known, &self.config.extensions);

        let mut inverse: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        let mut unresolved: BTreeMap<String, Vec<UnresolvedImport>> = BTreeMap::new();

        // Pass 1: dependencies
        for (path, record) in records.iter_mut() {
            let mut dependencies = BTreeSet::new();

            for import in record.imports.iter_mut() {
                import.resolved_path = None;
                if import.kind != ImportKind::Relative {
                    continue;
                }

                match resolver.resolve_relative(path, &import.raw_specifier) {
                    Some(target) => {
                        inverse.entry(target.clone()).or_default().insert(path.clone());
                        import.resolved_path = Some(target.clone());
                        dependencies.insert(target);
                    }
                    None => {
                        unresolved.entry(path.clone()).or_default().push(UnresolvedImport {
                            specifier: import.raw_specifier.clone(),
                            line_number: import.line_number,
                        });
                    }
                }
            }

            record.dependencies = dependencies.into_iter().collect();
        }

        // Pass 2: dependents, only after every dependency list is complete
        for (path, record) in records.iter_mut() {
            record.dependents = inverse
                .remove(path)
                .map(|set| set.into_iter().collect())
                .unwrap_or_default();
        }

        let mut graph = DependencyGraph::new(records);
        graph.unresolved_imports = unresolved;

        debug!(
            files = graph.len(),
            edges = graph.edges().count(),
            unresolved = graph.unresolved_imports.len(),
            "dependency graph built"
        );

        graph
    }
}

impl Default for DependencyGraphBuilder {
    fn default() -> Self {
        Self::new(GraphBuilderConfig::default())
    }
}
