//! Breadcrumb trail entries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Folder;

/// One ancestor in a root-first navigation trail. Derived, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Folder ID.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// Folder path.
    pub path: String,
}

impl From<&Folder> for Breadcrumb {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name.clone(),
            path: folder.path.clone(),
        }
    }
}
