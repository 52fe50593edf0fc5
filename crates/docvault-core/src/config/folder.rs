//! Folder tree configuration.

use serde::{Deserialize, Serialize};

/// Folder tree behavior switches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderConfig {
    /// Fail folder creation with NotFound when the parent does not resolve
    /// under the caller. When `false`, the folder is created at the root.
    #[serde(default = "default_reject_unknown_parent")]
    pub reject_unknown_parent: bool,
}

impl Default for FolderConfig {
    fn default() -> Self {
        Self {
            reject_unknown_parent: default_reject_unknown_parent(),
        }
    }
}

fn default_reject_unknown_parent() -> bool {
    true
}
