//! Directory walking for source discovery
//!
//! Traversal is partial-failure tolerant: an unreadable directory or file is
//! logged, collected into the [`ScanReport`] and skipped.

use crate::core::cancel::CancellationToken;
use crate::error::{Result, RippleError};
use crate::models::config::Settings;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Files found by a scan plus the entries that could not be read
#[derive(Debug, Default)]
pub struct ScanReport {
    pub files: Vec<PathBuf>,
    pub errors: Vec<RippleError>,
}

/// Walks a source tree and returns analyzable files
pub struct SourceScanner {
    root: PathBuf,
    extensions: Vec<String>,
    ignore_patterns: Vec<String>,
    follow_links: bool,
    cancel: CancellationToken,
}

impl SourceScanner {
    pub fn new(settings: &Settings) -> Self {
        Self {
            root: settings.scan_path.clone(),
            extensions: settings.normalized_extensions(),
            ignore_patterns: settings
                .ignore_patterns
                .iter()
                .filter(|p| !p.is_empty())
                .cloned()
                .collect(),
            follow_links: settings.follow_links,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect candidate files under the root, in file-name order
    pub fn scan(&self) -> Result<ScanReport> {
        if !self.root.is_dir() {
            return Err(RippleError::InvalidPath {
                path: self.root.clone(),
            });
        }

        let mut report = ScanReport::default();

        // walkdir reports symlink loops as entry errors when following links
        let walker = WalkDir::new(&self.root)
            .follow_links(self.follow_links)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_ignored(entry.path()));

        for entry in walker {
            if self.cancel.is_cancelled() {
                return Err(RippleError::Interrupted);
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    let error = match err.io_error().map(io::Error::kind) {
                        Some(io::ErrorKind::PermissionDenied) => RippleError::permission_denied(path),
                        _ => RippleError::scan_io_error(path, err.to_string()),
                    };
                    warn!("skipping unreadable entry: {}", error);
                    report.errors.push(error);
                    continue;
                }
            };

            if entry.file_type().is_file() && self.has_allowed_extension(entry.path()) {
                report.files.push(entry.into_path());
            }
        }

        debug!(
            root = %self.root.display(),
            files = report.files.len(),
            errors = report.errors.len(),
            "scan finished"
        );

        Ok(report)
    }

    /// True when a segment below the root contains an ignore substring
    fn is_ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative.components().any(|component| {
            let segment = component.as_os_str().to_string_lossy();
            self.ignore_patterns
                .iter()
                .any(|pattern| segment.contains(pattern.as_str()))
        })
    }

    fn has_allowed_extension(&self, path: &Path) -> bool {
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}
