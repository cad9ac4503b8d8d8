//! Shared helpers

pub mod path_class;
pub mod path_resolver;

pub use path_class::{is_api_path, is_global_path, is_page_path, is_shared_path};
pub use path_resolver::{normalize_path, parent_dir, path_key, strip_root, PathResolver};
