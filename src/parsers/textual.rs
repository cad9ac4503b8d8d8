//! Line-oriented import/export extraction
//!
//! Recognizes, one line at a time:
//! - `import <bindings> from '<specifier>'`
//! - `require('<specifier>')`, with an optional `const x = ` / `const { a } = ` binding
//! - `export <function|class|interface|type|const|let|var> <name>`
//! - `export default <name>`
//!
//! Not recognized: imports spanning several lines, `export * from`, dynamic
//! `import()`, and `export { a, b }` lists. Line numbers are 1-based.

use super::extractor::{Extraction, LineMatch, SymbolExtractor};
use crate::models::analysis::{ExportKind, ExportSymbol, ImportEdge, ImportKind};
use once_cell::sync::Lazy;
use regex::Regex;

static IMPORT_FROM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*import\s+(?:type\s+)?(.+?)\s+from\s+['"]([^'"]+)['"]"#).expect("valid import regex")
});

static REQUIRE_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\brequire\(\s*['"]([^'"]+)['"]\s*\)"#).expect("valid require regex")
});

static REQUIRE_BINDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:const|let|var)\s+(\{[^}]*\}|[A-Za-z_$][\w$]*)\s*=\s*require\("#)
        .expect("valid require binding regex")
});

static EXPORT_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*export\s+(default\s+)?(?:declare\s+)?(?:abstract\s+)?(?:async\s+)?(function\*?|class|interface|type|const|let|var)\s+([A-Za-z_$][\w$]*)",
    )
    .expect("valid export regex")
});

static EXPORT_DEFAULT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*export\s+default\s+(?:async\s+)?([A-Za-z_$][\w$]*)").expect("valid default export regex")
});

/// Regex-per-line extractor; trades resolution accuracy for speed and zero parser dependencies
#[derive(Debug, Default, Clone, Copy)]
pub struct TextualHeuristicExtractor;

impl TextualHeuristicExtractor {
    pub fn new() -> Self {
        Self
    }

    /// All matches on a single line
    pub fn scan_line(&self, path: &str, line_number: usize, line: &str) -> Vec<LineMatch> {
        let trimmed = line.trim_start();
        if trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*') {
            return Vec::new();
        }

        let mut matches = Vec::new();

        if let Some(caps) = IMPORT_FROM.captures(line) {
            let specifier = caps[2].to_string();
            matches.push(LineMatch::Import(ImportEdge {
                from_path: path.to_string(),
                kind: ImportKind::from_specifier(&specifier),
                raw_specifier: specifier,
                resolved_path: None,
                imported_symbols: parse_bindings(&caps[1]),
                line_number,
            }));
        }

        let require_symbols = REQUIRE_BINDING
            .captures(line)
            .map(|caps| parse_bindings(&caps[1]))
            .unwrap_or_default();
        for (idx, caps) in REQUIRE_CALL.captures_iter(line).enumerate() {
            let specifier = caps[1].to_string();
            matches.push(LineMatch::Import(ImportEdge {
                from_path: path.to_string(),
                kind: ImportKind::from_specifier(&specifier),
                raw_specifier: specifier,
                resolved_path: None,
                // A binding only belongs to the first call on the line
                imported_symbols: if idx == 0 { require_symbols.clone() } else { Vec::new() },
                line_number,
            }));
        }

        if let Some(export) = parse_export(line, line_number) {
            matches.push(LineMatch::Export(export));
        }

        matches
    }
}

impl SymbolExtractor for TextualHeuristicExtractor {
    fn name(&self) -> &'static str {
        "textual-heuristic"
    }

    fn extract(&self, path: &str, source: &str) -> Extraction {
        source
            .lines()
            .enumerate()
            .flat_map(|(idx, line)| self.scan_line(path, idx + 1, line))
            .collect()
    }
}

fn parse_export(line: &str, line_number: usize) -> Option<ExportSymbol> {
    if let Some(caps) = EXPORT_DECL.captures(line) {
        let declared = ExportKind::from_keyword(&caps[2]).unwrap_or(ExportKind::Const);
        // `export default class extends Base {}` is anonymous
        let name = match &caps[3] {
            "extends" | "implements" => "default",
            other => other,
        };
        return Some(ExportSymbol {
            name: name.to_string(),
            kind: infer_kind(line).unwrap_or(declared),
            line_number,
            is_default: caps.get(1).is_some(),
        });
    }

    let caps = EXPORT_DEFAULT.captures(line)?;
    let word = &caps[1];
    // `export default function () {}` and friends have no name of their own
    let name = if ExportKind::from_keyword(word).is_some() {
        "default".to_string()
    } else {
        word.to_string()
    };

    Some(ExportSymbol {
        name,
        kind: infer_kind(line).unwrap_or(ExportKind::Const),
        line_number,
        is_default: true,
    })
}

/// First declaration keyword present on the line, by fixed priority
fn infer_kind(line: &str) -> Option<ExportKind> {
    let words: Vec<&str> = line
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .filter(|w| !w.is_empty())
        .collect();

    ExportKind::PRIORITY
        .iter()
        .copied()
        .find(|kind| words.contains(&kind.keyword()))
}

/// Identifier names from an import binding clause
///
/// Handles `Default`, `{ a, b as c }`, `* as ns`, `Default, { a }` and the
/// destructuring form `{ a, b: c }` used with `require`.
fn parse_bindings(raw: &str) -> Vec<String> {
    let raw = raw.trim();
    let mut names = Vec::new();

    let (outside, inside) = match (raw.find('{'), raw.rfind('}')) {
        (Some(open), Some(close)) if close > open => (
            format!("{}{}", &raw[..open], &raw[close + 1..]),
            Some(&raw[open + 1..close]),
        ),
        _ => (raw.to_string(), None),
    };

    for part in outside.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if let Some(rest) = part.strip_prefix('*') {
            if let Some(alias) = rest.trim().strip_prefix("as") {
                push_identifier(&mut names, alias);
            }
        } else {
            push_identifier(&mut names, part);
        }
    }

    if let Some(inside) = inside {
        for part in inside.split(',') {
            let part = part.trim();
            let part = part.strip_prefix("type ").unwrap_or(part);
            let imported = part
                .split(" as ")
                .next()
                .and_then(|p| p.split(':').next())
                .unwrap_or("");
            push_identifier(&mut names, imported);
        }
    }

    names
}

fn push_identifier(names: &mut Vec<String>, candidate: &str) {
    let candidate = candidate.trim();
    let valid = !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if valid {
        names.push(candidate.to_string());
    }
}
