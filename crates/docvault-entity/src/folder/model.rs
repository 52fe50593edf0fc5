//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A folder in a user's tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name, unique among siblings.
    pub name: String,
    /// Materialized ancestor path (`/` at the root, `/Docs/` under `Docs`).
    pub path: String,
    /// Parent folder ID (null for root-level folders).
    pub parent_id: Option<Uuid>,
    /// The folder owner.
    pub owner_id: Uuid,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root-level folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// The path its children are stored under.
    pub fn child_path(&self) -> String {
        format!("{}{}/", self.path, self.name)
    }
}

/// A folder together with the size of its direct contents.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FolderSummary {
    /// The folder itself.
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub folder: Folder,
    /// Number of direct child folders.
    pub child_count: i64,
    /// Number of direct child files.
    pub file_count: i64,
}

/// A renamed folder and how many descendant paths moved with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRename {
    pub folder: Folder,
    pub descendants: u64,
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name (already trimmed and validated).
    pub name: String,
    /// Materialized path computed from the parent.
    pub path: String,
    /// Parent folder (None for root).
    pub parent_id: Option<Uuid>,
    /// The folder owner.
    pub owner_id: Uuid,
}
