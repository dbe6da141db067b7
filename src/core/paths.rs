//! Path utilities
//!
//! Resolves where the translation cache lives relative to the working root.

use std::path::{Path, PathBuf};

/// Directory name used for the cache when no explicit directory is given
pub const CACHE_DIR_NAME: &str = "translation_cache";

/// File name of the persisted cache document
pub const CACHE_FILE_NAME: &str = "translation_cache.json";

/// File name of the advisory writer lock next to the document
pub const LOCK_FILE_NAME: &str = "translation_cache.lock";

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Get the default cache directory for a given root
pub fn cache_dir(root: &Path) -> PathBuf {
    root.join(CACHE_DIR_NAME)
}

/// Get the cache document path inside a cache directory
pub fn cache_file(dir: &Path) -> PathBuf {
    dir.join(CACHE_FILE_NAME)
}

/// Get the writer lock path inside a cache directory
pub fn lock_file(dir: &Path) -> PathBuf {
    dir.join(LOCK_FILE_NAME)
}

/// Resolve an optional user-supplied cache directory against the root
pub fn resolve_cache_dir(root: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(dir) if dir.is_absolute() => dir.to_path_buf(),
        Some(dir) => root.join(dir),
        None => cache_dir(root),
    }
}
