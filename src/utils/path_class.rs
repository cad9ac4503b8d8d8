//! Path-substring classes used by risk scoring, plan templates and validation
//!
//! Callers pass keys relative to the scan root (see `strip_root`), so the
//! directory a project is checked out under never changes its class.
//!
//! Probes run against the key with a leading `/`, so a top-level `utils/x.ts`
//! matches `/utils/` just like `src/utils/x.ts` does.

fn rooted(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Shared utility code (`/utils/`, `/lib/`)
pub fn is_shared_path(path: &str) -> bool {
    let probe = rooted(path);
    probe.contains("/utils/") || probe.contains("/lib/")
}

/// Project-wide globals: a `global/` or `globals/` directory, or a
/// `global.*` / `globals.*` file
pub fn is_global_path(path: &str) -> bool {
    let probe = rooted(path);
    if probe.contains("/global/") || probe.contains("/globals/") {
        return true;
    }
    let file_name = probe.rsplit('/').next().unwrap_or("");
    let stem = file_name.split('.').next().unwrap_or("");
    file_name.contains('.') && (stem == "global" || stem == "globals")
}

/// API surface (`/api/`)
pub fn is_api_path(path: &str) -> bool {
    rooted(path).contains("/api/")
}

/// Page or route module
pub fn is_page_path(path: &str) -> bool {
    let probe = rooted(path);
    let file_name = probe.rsplit('/').next().unwrap_or("");
    probe.contains("/pages/") || probe.contains("/routes/") || file_name.starts_with("page.")
}
