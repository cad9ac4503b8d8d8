//! Whole-project analysis runs
//!
//! scan -> parallel read + analyze -> barrier -> build graph -> score risk

use crate::core::cancel::CancellationToken;
use crate::core::parallel::{bounded_pool, process_with_progress, ProgressUpdate};
use crate::core::risk::RiskScorer;
use crate::core::scanner::SourceScanner;
use crate::error::{Result, ResultExt, RippleError};
use crate::models::analysis::AnalysisRecord;
use crate::models::config::Settings;
use crate::models::dependency_graph::DependencyGraph;
use crate::parsers::dependency_graph_builder::{DependencyGraphBuilder, GraphBuilderConfig};
use crate::parsers::file_analyzer::FileAnalyzer;
use crate::utils::path_resolver::{normalize_path, path_key};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of one analysis run
#[derive(Debug)]
pub struct AnalysisRun {
    pub graph: DependencyGraph,
    /// Non-fatal scan and read failures
    pub errors: Vec<RippleError>,
    pub duration: Duration,
}

/// Drives a full analysis of the configured source tree
pub struct ProjectAnalyzer {
    settings: Settings,
    analyzer: FileAnalyzer,
    cancel: CancellationToken,
}

impl ProjectAnalyzer {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            analyzer: FileAnalyzer::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_analyzer(mut self, analyzer: FileAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Analyze the tree without progress reporting
    pub fn analyze(&self) -> Result<AnalysisRun> {
        self.analyze_with_progress(|_| {})
    }

    /// Analyze the tree, calling `progress` after each file
    pub fn analyze_with_progress<F>(&self, progress: F) -> Result<AnalysisRun>
    where
        F: Fn(ProgressUpdate) + Send + Sync,
    {
        let start = Instant::now();

        let scan = SourceScanner::new(&self.settings)
            .with_cancellation(self.cancel.clone())
            .scan()?;
        let mut errors = scan.errors;

        let workers = self.settings.effective_read_workers();
        let pool = bounded_pool(workers)?;
        debug!(files = scan.files.len(), workers, "reading sources");

        let records: DashMap<String, AnalysisRecord> = DashMap::new();
        let read_errors = process_with_progress(
            &pool,
            &scan.files,
            |path| self.read_and_analyze(path, &records),
            progress,
        );

        if self.cancel.is_cancelled() {
            return Err(RippleError::Interrupted);
        }

        for err in read_errors.into_iter().flatten() {
            warn!("skipping unreadable file: {}", err);
            errors.push(err);
        }

        // Barrier: the builder only runs on the complete map
        let records: BTreeMap<String, AnalysisRecord> = records.into_iter().collect();
        let graph = self.build(records);

        info!(
            files = graph.len(),
            skipped = errors.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "analysis complete"
        );

        Ok(AnalysisRun {
            graph,
            errors,
            duration: start.elapsed(),
        })
    }

    /// Analyze in-memory sources keyed by path
    pub fn analyze_sources<I, P, S>(&self, sources: I) -> DependencyGraph
    where
        I: IntoIterator<Item = (P, S)>,
        P: AsRef<str>,
        S: AsRef<str>,
    {
        let records = sources
            .into_iter()
            .map(|(path, source)| {
                let key = normalize_path(path.as_ref());
                let record = self.analyzer.analyze(&key, source.as_ref());
                (key, record)
            })
            .collect();
        self.build(records)
    }

    fn build(&self, records: BTreeMap<String, AnalysisRecord>) -> DependencyGraph {
        let builder = DependencyGraphBuilder::new(GraphBuilderConfig::from_settings(&self.settings));
        let mut graph = builder.build(records);
        graph.root = path_key(&self.settings.scan_path);
        RiskScorer::score_all(&mut graph);
        graph
    }

    fn read_and_analyze(&self, path: &Path, records: &DashMap<String, AnalysisRecord>) -> Option<RippleError> {
        if self.cancel.is_cancelled() {
            return None;
        }

        match fs::read_to_string(path).with_file_context(path) {
            Ok(source) => {
                let key = path_key(path);
                let record = self.analyzer.analyze(&key, &source);
                records.insert(key, record);
                None
            }
            Err(err) => Some(err),
        }
    }
}
