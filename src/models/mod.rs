//! Data models and structures for Ripple

pub mod analysis;
pub mod config;
pub mod dependency_graph;
pub mod impact;
pub mod plan;
pub mod validation;

pub use analysis::{AnalysisRecord, ExportKind, ExportSymbol, ImportEdge, ImportKind, RiskLevel};
pub use config::{OutputFormat, PartialSettings, Settings};
pub use dependency_graph::{DependencyGraph, GraphStatistics, UnresolvedImport};
pub use impact::{ChangeKind, ImpactRecord, ImpactType, Severity};
pub use plan::{ChangePlan, ChangeType, PlanContent, PlanStatus, PlanStep};
pub use validation::ValidationResult;
