//! Core analysis pipeline: scanning, parallel analysis, risk and impact

pub mod cancel;
pub mod impact;
pub mod parallel;
pub mod project;
pub mod risk;
pub mod scanner;

pub use cancel::CancellationToken;
pub use impact::ImpactPredictor;
pub use parallel::ProgressUpdate;
pub use project::{AnalysisRun, ProjectAnalyzer};
pub use risk::RiskScorer;
pub use scanner::{ScanReport, SourceScanner};
