//! Stateless checks on proposed file content
//!
//! Rule sets are chosen by path: pages/routes, API modules and shared
//! utilities (including project-wide globals) each have required exports.
//! Generic rules apply everywhere.
//! Findings land in a [`ValidationResult`]; nothing here returns an error.

use crate::models::plan::ChangeType;
use crate::models::validation::ValidationResult;
use crate::utils::path_class::{is_api_path, is_global_path, is_page_path, is_shared_path};
use crate::utils::path_resolver::strip_root;
use once_cell::sync::Lazy;
use regex::Regex;

static HARDCODED_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\blocalhost\b|\b(?:\d{1,3}\.){3}\d{1,3}\b").expect("valid host regex")
});

static AWAIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bawait\b").expect("valid await regex"));
static TRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\btry\s*\{").expect("valid try regex"));
static CATCH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bcatch\b").expect("valid catch regex"));
static CONSOLE_LOG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bconsole\.log\s*\(").expect("valid console regex"));

static DEFAULT_EXPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*export\s+default\b").expect("valid default export regex"));

static NAMED_EXPORT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*export\s+(?:declare\s+)?(?:async\s+)?(?:function|class|interface|type|const|let|var|enum)\b|^\s*export\s*\{")
        .expect("valid named export regex")
});

/// Check `content` proposed for `path` under `change_type`
pub fn validate_change(path: &str, change_type: ChangeType, content: &str) -> ValidationResult {
    validate_change_under("", path, change_type, content)
}

/// Same as [`validate_change`], choosing rule sets by the part of `path`
/// below the scan root `root`
pub fn validate_change_under(root: &str, path: &str, change_type: ChangeType, content: &str) -> ValidationResult {
    let class_path = strip_root(path, root);
    let mut result = ValidationResult::new();

    if change_type == ChangeType::Delete {
        result.recommend("Confirm no remaining import references the deleted file");
        return result;
    }

    if content.trim().is_empty() {
        if matches!(change_type, ChangeType::Modify | ChangeType::Add) {
            result.error(format!("Proposed content for {} is empty", path));
        }
        return result;
    }

    if is_page_path(class_path) {
        check_page(content, &mut result);
    }
    if is_api_path(class_path) {
        check_api(content, &mut result);
    }
    if is_shared_path(class_path) || is_global_path(class_path) {
        check_shared(content, &mut result);
    }
    check_generic(content, &mut result);

    result
}

fn check_page(content: &str, result: &mut ValidationResult) {
    if !DEFAULT_EXPORT.is_match(content) {
        result.error("Page and route modules must have a default export");
    }
    if CONSOLE_LOG.is_match(content) {
        result.warning("console.log left in a page module");
        result.recommend("Remove debug logging before shipping pages");
    }
}

fn check_api(content: &str, result: &mut ValidationResult) {
    if !DEFAULT_EXPORT.is_match(content) && !NAMED_EXPORT.is_match(content) {
        result.error("API modules must export at least one handler");
    }
    result.recommend("Keep request and response shapes backward compatible");
}

fn check_shared(content: &str, result: &mut ValidationResult) {
    if !NAMED_EXPORT.is_match(content) {
        result.error("Shared utility modules must have at least one named export");
    }
    if DEFAULT_EXPORT.is_match(content) {
        result.warning("Default export in a shared utility module");
        result.recommend("Prefer named exports for shared utilities");
    }
}

fn check_generic(content: &str, result: &mut ValidationResult) {
    if HARDCODED_HOST.is_match(content) {
        result.warning("Hardcoded localhost or IP address literal");
        result.recommend("Read hosts and endpoints from configuration");
    }

    if AWAIT.is_match(content) && !(TRY.is_match(content) && CATCH.is_match(content)) {
        result.warning("await used without try/catch error handling");
        result.recommend("Wrap awaited calls in try/catch and handle failures");
    }
}
