//! Source tree discovery tests

use ripple::core::{CancellationToken, SourceScanner};
use ripple::error::RippleError;
use ripple::models::config::Settings;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn names(root: &Path, files: &[std::path::PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

#[test]
fn test_scan_filters_extensions_and_ignores() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "app.ts", "export const app = 1;");
    write(root, "components/Button.tsx", "export default function Button() {}");
    write(root, "legacy/util.js", "module.exports = {};");
    write(root, "styles/site.css", "body {}");
    write(root, "README.md", "# readme");
    write(root, "node_modules/react/index.js", "module.exports = {};");
    write(root, "dist/app.js", "");

    let report = SourceScanner::new(&Settings::for_root(root)).scan().unwrap();

    assert!(report.errors.is_empty());
    assert_eq!(
        names(root, &report.files),
        vec!["app.ts", "components/Button.tsx", "legacy/util.js"]
    );
}

#[test]
fn test_ignore_patterns_do_not_apply_to_the_root_itself() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("build-tools");
    write(&root, "src/index.ts", "export const x = 1;");
    write(&root, "src/build/generated.ts", "export const y = 2;");

    let report = SourceScanner::new(&Settings::for_root(&root)).scan().unwrap();

    assert_eq!(names(&root, &report.files), vec!["src/index.ts"]);
}

#[test]
fn test_custom_extensions() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a.ts", "");
    write(root, "b.vue", "");

    let mut settings = Settings::for_root(root);
    settings.extensions = vec![".vue".to_string()];
    let report = SourceScanner::new(&settings).scan().unwrap();

    assert_eq!(names(root, &report.files), vec!["b.vue"]);
}

#[test]
fn test_missing_root_is_invalid_path() {
    let dir = tempdir().unwrap();
    let result = SourceScanner::new(&Settings::for_root(dir.path().join("missing"))).scan();
    assert!(matches!(result, Err(RippleError::InvalidPath { .. })));
}

#[test]
fn test_cancelled_scan_is_interrupted() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.ts", "");

    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = SourceScanner::new(&Settings::for_root(dir.path()))
        .with_cancellation(cancel)
        .scan();

    assert!(matches!(result, Err(RippleError::Interrupted)));
}
