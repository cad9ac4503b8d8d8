//! Dependency graph over analyzed source files

use super::analysis::{AnalysisRecord, RiskLevel};
use crate::utils::path_resolver::strip_root;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A relative import that did not resolve to an analyzed file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedImport {
    pub specifier: String,
    pub line_number: usize,
}

/// Complete dependency graph for one analysis run
///
/// Edges live inside the records (`dependencies` / `dependents`); the
/// builder keeps both directions symmetric.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraph {
    /// All analyzed files keyed by path
    pub records: BTreeMap<String, AnalysisRecord>,

    /// Relative imports per file that resolved to nothing in the analyzed set
    pub unresolved_imports: BTreeMap<String, Vec<UnresolvedImport>>,

    /// Key of the scan root the records were walked from
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub root: String,
}

impl DependencyGraph {
    pub fn new(records: BTreeMap<String, AnalysisRecord>) -> Self {
        Self {
            records,
            unresolved_imports: BTreeMap::new(),
            root: String::new(),
        }
    }

    /// `path` relative to the scan root; path classes are probed on this
    pub fn relative_path<'a>(&self, path: &'a str) -> &'a str {
        strip_root(path, &self.root)
    }

    pub fn get(&self, path: &str) -> Option<&AnalysisRecord> {
        self.records.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.records.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.records.keys()
    }

    /// Files importing `path`; empty for unknown paths
    pub fn dependents_of(&self, path: &str) -> &[String] {
        self.records
            .get(path)
            .map(|r| r.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Analyzed files imported by `path`; empty for unknown paths
    pub fn dependencies_of(&self, path: &str) -> &[String] {
        self.records
            .get(path)
            .map(|r| r.dependencies.as_slice())
            .unwrap_or(&[])
    }

    /// All (importer, imported) pairs
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.records.iter().flat_map(|(from, record)| {
            record
                .dependencies
                .iter()
                .map(move |to| (from.as_str(), to.as_str()))
        })
    }

    /// Back-edges found by depth-first search over dependencies
    ///
    /// Each pair closes at least one import cycle.
    pub fn circular_dependencies(&self) -> BTreeSet<(String, String)> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        let mut marks: BTreeMap<&str, Mark> =
            self.records.keys().map(|k| (k.as_str(), Mark::Unvisited)).collect();
        let mut cycles = BTreeSet::new();

        for root in self.records.keys() {
            if marks.get(root.as_str()) != Some(&Mark::Unvisited) {
                continue;
            }

            // Iterative DFS; each frame is (node, index of next dependency)
            let mut stack: Vec<(&str, usize)> = vec![(root.as_str(), 0)];
            marks.insert(root.as_str(), Mark::InProgress);

            while let Some((node, idx)) = stack.pop() {
                let deps = self.dependencies_of(node);
                if idx < deps.len() {
                    stack.push((node, idx + 1));
                    let next = deps[idx].as_str();
                    match marks.get(next).copied() {
                        Some(Mark::Unvisited) => {
                            marks.insert(next, Mark::InProgress);
                            stack.push((next, 0));
                        }
                        Some(Mark::InProgress) => {
                            cycles.insert((node.to_string(), next.to_string()));
                        }
                        _ => {}
                    }
                } else {
                    marks.insert(node, Mark::Done);
                }
            }
        }

        cycles
    }

    /// Get statistics about the dependency graph
    pub fn statistics(&self) -> GraphStatistics {
        let mut stats = GraphStatistics {
            total_nodes: self.records.len(),
            ..Default::default()
        };

        for (path, record) in &self.records {
            stats.total_edges += record.dependencies.len();

            let fan_in = record.fan_in();
            let fan_out = record.fan_out();

            if fan_in > stats.max_fan_in {
                stats.max_fan_in = fan_in;
                stats.max_fan_in_file = Some(path.clone());
            }

            if fan_out > stats.max_fan_out {
                stats.max_fan_out = fan_out;
                stats.max_fan_out_file = Some(path.clone());
            }

            match record.risk_level {
                RiskLevel::Low => stats.low_risk += 1,
                RiskLevel::Medium => stats.medium_risk += 1,
                RiskLevel::High => stats.high_risk += 1,
                RiskLevel::Critical => stats.critical_risk += 1,
            }
        }

        stats.unresolved_count = self.unresolved_imports.values().map(|v| v.len()).sum();
        stats.circular_count = self.circular_dependencies().len();
        stats
    }

    /// Export to DOT format for visualization
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph dependencies {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box];\n\n");

        for (path, record) in &self.records {
            let label = path.rsplit('/').next().unwrap_or(path);

            let color = match record.risk_level {
                RiskLevel::Critical => "red",
                RiskLevel::High => "orange",
                RiskLevel::Medium => "goldenrod",
                RiskLevel::Low => "black",
            };

            dot.push_str(&format!(
                "  \"{}\" [label=\"{}\", color={}];\n",
                path, label, color
            ));
        }

        dot.push('\n');

        let cycles = self.circular_dependencies();
        for (from, to) in self.edges() {
            let is_cycle = cycles.contains(&(from.to_string(), to.to_string()));
            let style = if is_cycle { "color=red, style=bold" } else { "style=solid" };
            dot.push_str(&format!("  \"{}\" -> \"{}\" [{}];\n", from, to, style));
        }

        dot.push_str("}\n");
        dot
    }
}

/// Statistics about the dependency graph
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GraphStatistics {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub unresolved_count: usize,
    pub circular_count: usize,
    pub max_fan_in: usize,
    pub max_fan_in_file: Option<String>,
    pub max_fan_out: usize,
    pub max_fan_out_file: Option<String>,
    pub low_risk: usize,
    pub medium_risk: usize,
    pub high_risk: usize,
    pub critical_risk: usize,
}
