//! Module path resolution utilities
//!
//! Resolution is purely lexical: a relative specifier is joined onto the
//! importing file's directory and looked up among the analyzed paths. The
//! filesystem is never consulted.

use std::collections::HashSet;
use std::path::Path;

/// Render a filesystem path as a graph key
pub fn path_key(path: &Path) -> String {
    normalize_path(&path.to_string_lossy())
}

/// Lexically normalize a `/`-separated path
///
/// Collapses `.` and `..` segments and duplicate separators; backslashes are
/// treated as separators.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(last) if *last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if absolute {
        format!("/{}", joined)
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// `key` with the scan-root prefix `root` removed
///
/// Keys outside `root`, and roots of `""` or `.`, come back unchanged.
pub fn strip_root<'a>(key: &'a str, root: &str) -> &'a str {
    if root.is_empty() || root == "." {
        return key;
    }
    let root = root.trim_end_matches('/');
    match key.strip_prefix(root) {
        Some(rest) if rest.starts_with('/') => &rest[1..],
        _ => key,
    }
}

/// Directory part of a key; empty for bare file names
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Source extensions an ESM-style specifier may carry while pointing at a
/// differently-suffixed source file
const RUNTIME_EXTENSIONS: [&str; 4] = [".js", ".jsx", ".mjs", ".cjs"];

/// Resolves relative specifiers against a fixed set of known paths
pub struct PathResolver<'a> {
    known: &'a HashSet<String>,
    extensions: Vec<String>,
}

impl<'a> PathResolver<'a> {
    /// Create a resolver over `known` keys, trying `extensions` in order
    pub fn new(known: &'a HashSet<String>, extensions: &[String]) -> Self {
        Self {
            known,
            extensions: extensions.to_vec(),
        }
    }

    /// Resolve `specifier` imported from the file `from`
    ///
    /// Tries the exact key, then each extension, then `index` files inside a
    /// directory of that name.
    pub fn resolve_relative(&self, from: &str, specifier: &str) -> Option<String> {
        let dir = parent_dir(from);
        let joined = if dir.is_empty() {
            specifier.to_string()
        } else {
            format!("{}/{}", dir, specifier)
        };
        let base = normalize_path(&joined);

        self.candidates(&base)
            .into_iter()
            .find(|candidate| self.known.contains(candidate))
    }

    fn candidates(&self, base: &str) -> Vec<String> {
        let mut candidates = vec![base.to_string()];

        for ext in &self.extensions {
            candidates.push(format!("{}{}", base, ext));
        }

        // `./a.js` written against `a.ts`
        if let Some(stem) = RUNTIME_EXTENSIONS
            .iter()
            .find_map(|ext| base.strip_suffix(ext))
        {
            for ext in &self.extensions {
                candidates.push(format!("{}{}", stem, ext));
            }
        }

        for ext in &self.extensions {
            candidates.push(format!("{}/index{}", base, ext));
        }

        candidates
    }
}
