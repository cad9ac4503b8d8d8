//! Source text extraction and graph construction
//!
//! Extraction is line-oriented and sits behind the [`SymbolExtractor`]
//! trait; the graph builder consumes the resulting records.

pub mod dependency_graph_builder;
pub mod extractor;
pub mod file_analyzer;
pub mod textual;

pub use dependency_graph_builder::{DependencyGraphBuilder, GraphBuilderConfig};
pub use extractor::{Extraction, LineMatch, SymbolExtractor};
pub use file_analyzer::FileAnalyzer;
pub use textual::TextualHeuristicExtractor;
