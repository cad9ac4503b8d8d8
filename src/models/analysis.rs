//! Per-file analysis records

use super::impact::ImpactRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an import specifier is addressed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    /// Starts with `.` and is resolved against the importing file
    Relative,
    /// Starts with `/`
    Absolute,
    /// Bare package name
    Package,
}

impl ImportKind {
    /// Classify a raw specifier
    pub fn from_specifier(specifier: &str) -> Self {
        if specifier.starts_with('.') {
            ImportKind::Relative
        } else if specifier.starts_with('/') {
            ImportKind::Absolute
        } else {
            ImportKind::Package
        }
    }
}

/// A single `import ... from` or `require(...)` occurrence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportEdge {
    pub from_path: String,
    pub raw_specifier: String,
    /// Filled in by the graph builder when the specifier resolves to an analyzed file
    pub resolved_path: Option<String>,
    pub imported_symbols: Vec<String>,
    /// 1-based
    pub line_number: usize,
    pub kind: ImportKind,
}

/// Declaration keyword behind an export
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    Function,
    Class,
    Interface,
    Type,
    Const,
    Let,
    Var,
}

impl ExportKind {
    /// Keyword priority used when a line mentions several declaration keywords
    pub const PRIORITY: [ExportKind; 7] = [
        ExportKind::Function,
        ExportKind::Class,
        ExportKind::Interface,
        ExportKind::Type,
        ExportKind::Const,
        ExportKind::Let,
        ExportKind::Var,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            ExportKind::Function => "function",
            ExportKind::Class => "class",
            ExportKind::Interface => "interface",
            ExportKind::Type => "type",
            ExportKind::Const => "const",
            ExportKind::Let => "let",
            ExportKind::Var => "var",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::PRIORITY
            .iter()
            .copied()
            .find(|kind| kind.keyword() == keyword.trim_end_matches('*'))
    }
}

/// A symbol exported from a file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExportSymbol {
    pub name: String,
    pub kind: ExportKind,
    pub line_number: usize,
    pub is_default: bool,
}

/// Risk classification of a file; ordered from least to most risky
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// High and critical targets are surfaced for human review
    pub fn needs_review(&self) -> bool {
        *self >= RiskLevel::High
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analysis snapshot of one source file
///
/// `dependencies`, `dependents` and `risk_level` are derived data: they are
/// written by the graph builder and the risk scorer only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub path: String,
    pub imports: Vec<ImportEdge>,
    pub exports: Vec<ExportSymbol>,
    pub dependencies: Vec<String>,
    pub dependents: Vec<String>,
    pub risk_level: RiskLevel,
    pub change_impacts: Vec<ImpactRecord>,
}

impl AnalysisRecord {
    /// Record with extracted imports/exports and empty graph fields
    pub fn shell(path: impl Into<String>, imports: Vec<ImportEdge>, exports: Vec<ExportSymbol>) -> Self {
        Self {
            path: path.into(),
            imports,
            exports,
            dependencies: Vec::new(),
            dependents: Vec::new(),
            risk_level: RiskLevel::Low,
            change_impacts: Vec::new(),
        }
    }

    /// Number of files importing this one
    pub fn fan_in(&self) -> usize {
        self.dependents.len()
    }

    /// Number of analyzed files this one imports
    pub fn fan_out(&self) -> usize {
        self.dependencies.len()
    }

    pub fn relative_imports(&self) -> impl Iterator<Item = &ImportEdge> {
        self.imports.iter().filter(|i| i.kind == ImportKind::Relative)
    }

    pub fn default_export(&self) -> Option<&ExportSymbol> {
        self.exports.iter().find(|e| e.is_default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_kind_from_specifier() {
        assert_eq!(ImportKind::from_specifier("./a"), ImportKind::Relative);
        assert_eq!(ImportKind::from_specifier("../lib/x"), ImportKind::Relative);
        assert_eq!(ImportKind::from_specifier("/abs/path"), ImportKind::Absolute);
        assert_eq!(ImportKind::from_specifier("react"), ImportKind::Package);
        assert_eq!(ImportKind::from_specifier("@scope/pkg"), ImportKind::Package);
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert!(RiskLevel::High < RiskLevel::Critical);
        assert!(RiskLevel::High.needs_review());
        assert!(!RiskLevel::Medium.needs_review());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = AnalysisRecord::shell("src/a.ts", Vec::new(), Vec::new());
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("riskLevel").is_some());
        assert!(json.get("changeImpacts").is_some());
        assert_eq!(json["riskLevel"], "low");
    }
}
