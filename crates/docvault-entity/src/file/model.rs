//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use docvault_core::types::{Locator, StorageBackend};

/// An uploaded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// Display name, unique among sibling files. Mutable.
    pub name: String,
    /// Name at upload time. Never changes.
    pub original_name: String,
    /// MIME type of the content.
    pub mime_type: String,
    /// Content size in bytes.
    pub size_bytes: i64,
    /// Backend that holds the blob.
    pub storage_backend: StorageBackend,
    /// Backend-specific blob address.
    #[serde(skip_serializing)]
    pub storage_locator: String,
    /// Containing folder (null for the root).
    pub folder_id: Option<Uuid>,
    /// The file owner.
    pub owner_id: Uuid,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// The tagged locator of the backing blob.
    pub fn locator(&self) -> Locator {
        Locator::from_parts(self.storage_backend, self.storage_locator.clone())
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .filter(|(base, ext)| !base.is_empty() && !ext.is_empty())
            .map(|(_, ext)| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Resolved display name.
    pub name: String,
    /// Caller-supplied original name.
    pub original_name: String,
    /// MIME type.
    pub mime_type: String,
    /// Content size in bytes.
    pub size_bytes: i64,
    /// Where the blob was written.
    pub locator: Locator,
    /// Containing folder (None for root).
    pub folder_id: Option<Uuid>,
    /// The file owner.
    pub owner_id: Uuid,
}
