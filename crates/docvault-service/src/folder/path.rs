//! Materialized path computation.

use docvault_entity::folder::Folder;

/// Root path shared by every top-level folder.
pub const ROOT_PATH: &str = "/";

/// The path stored on a new child of `parent` (or of the root).
pub fn resolve_path(parent: Option<&Folder>) -> String {
    match parent {
        Some(parent) => parent.child_path(),
        None => ROOT_PATH.to_string(),
    }
}
