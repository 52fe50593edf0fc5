//! Folder contents as a tagged union.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::file::File;
use crate::folder::FolderSummary;

/// One entry of a folder listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Item {
    /// A child folder with its content counts.
    Folder(FolderSummary),
    /// A child file.
    File(File),
}

impl Item {
    /// The item's identifier.
    pub fn id(&self) -> Uuid {
        match self {
            Self::Folder(summary) => summary.folder.id,
            Self::File(file) => file.id,
        }
    }

    /// The item's display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(summary) => &summary.folder.name,
            Self::File(file) => &file.name,
        }
    }

    /// Whether the item is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }
}
