//! Import/export extraction strategy
//!
//! The graph builder only depends on [`SymbolExtractor`], so the textual
//! heuristic extractor can be swapped for a syntax-tree backed one.

use crate::models::analysis::{ExportSymbol, ImportEdge};

/// One recognized construct on a source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    Import(ImportEdge),
    Export(ExportSymbol),
}

/// Everything extracted from one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub imports: Vec<ImportEdge>,
    pub exports: Vec<ExportSymbol>,
}

impl Extraction {
    pub fn push(&mut self, item: LineMatch) {
        match item {
            LineMatch::Import(edge) => self.imports.push(edge),
            LineMatch::Export(symbol) => self.exports.push(symbol),
        }
    }
}

impl FromIterator<LineMatch> for Extraction {
    fn from_iter<I: IntoIterator<Item = LineMatch>>(iter: I) -> Self {
        let mut extraction = Extraction::default();
        for item in iter {
            extraction.push(item);
        }
        extraction
    }
}

/// Pulls import edges and export symbols out of source text
pub trait SymbolExtractor: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    /// Extract from `source`, attributing imports to `path`
    fn extract(&self, path: &str, source: &str) -> Extraction;
}
