//! Joining logical paths onto the repository root.
//!
//! Logical paths are `/`-rooted strings owned by the abstract filesystem
//! layer, which is also responsible for normalizing them before they reach
//! this backend. The functions here only splice strings and native paths
//! together; they never touch the filesystem and never re-validate.

use std::path::{Path, PathBuf};

/// Resolve a logical path to its native path under `root`.
///
/// The logical root `"/"` (or an empty string) resolves to `root` itself.
pub fn full_path(root: &Path, logical: &str) -> PathBuf {
    let relative = logical.trim_start_matches('/');
    if relative.is_empty() {
        root.to_path_buf()
    } else {
        root.join(relative)
    }
}

/// Join a child name onto a logical parent path.
///
/// Used when building listing results, where the native layer yields bare
/// entry names.
pub fn join_logical(parent: &str, name: &str) -> String {
    if parent.ends_with('/') {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}
