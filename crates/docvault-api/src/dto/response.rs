//! Response DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use docvault_entity::file::File;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A file record with its human-readable size.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    #[serde(flatten)]
    pub file: File,
    /// e.g. `"1.5 MB"`.
    pub size_display: String,
}

impl From<File> for FileResponse {
    fn from(file: File) -> Self {
        let size_display = format_file_size(file.size_bytes);
        Self { file, size_display }
    }
}

/// Counts removed by a folder delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderDeletedResponse {
    /// Deleted folder ID.
    pub id: Uuid,
    /// Folder records removed, the target included.
    pub folders: usize,
    /// File records removed.
    pub files: usize,
}

/// Deleted resource identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: Uuid,
}

/// Upload rejected because the name is taken in the target folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadConflictResponse {
    pub success: bool,
    pub conflict: bool,
    /// The contested name.
    pub file_name: String,
}

/// Upload abandoned at the caller's request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadCancelledResponse {
    pub success: bool,
    pub cancelled: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `"ok"` when every storage backend is healthy, else `"degraded"`.
    pub status: String,
    /// Version.
    pub version: String,
    /// Backend that receives new uploads.
    pub active_storage: String,
    /// Per-backend health.
    pub storage: BTreeMap<String, bool>,
}

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable size with up to two decimals, trailing zeros dropped.
pub fn format_file_size(bytes: i64) -> String {
    if bytes <= 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < SIZE_UNITS.len() && bytes as u64 >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }

    let value = format!("{:.2}", bytes as f64 / scale as f64);
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{value} {}", SIZE_UNITS[unit])
}
