//! Ripple - dependency impact analysis for JavaScript/TypeScript source trees
//!
//! This library scans a source tree, builds an import/export dependency graph,
//! scores per-file risk, predicts the blast radius of a change, and drives
//! staged change plans with rollback.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod planner;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{CancellationToken, ImpactPredictor, ProjectAnalyzer, RiskScorer};
pub use error::{handle_error, try_with_recovery, ErrorSeverity, OptionExt, Result, ResultExt, RippleError};
pub use models::{
    analysis::{AnalysisRecord, RiskLevel},
    config::Settings,
    dependency_graph::DependencyGraph,
    impact::{ChangeKind, ImpactRecord},
    plan::{ChangePlan, ChangeType, PlanStatus, PlanStep},
    validation::ValidationResult,
};
pub use planner::{ChangePlanner, PlanStore};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
