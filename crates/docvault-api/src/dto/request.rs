//! Request DTOs with validation.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Parse an optional folder reference as sent by clients.
///
/// An empty value or the literal `null` names the root.
pub fn parse_optional_id(raw: &str) -> Result<Option<Uuid>, uuid::Error> {
    match raw.trim() {
        "" | "null" => Ok(None),
        value => value.parse().map(Some),
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(raw) => parse_optional_id(&raw)
            .map_err(|_| serde::de::Error::custom(format!("invalid folder id '{raw}'"))),
    }
}

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, message = "Folder name is required"))]
    pub name: String,
    /// Parent folder (omitted or null for the root).
    #[serde(default, deserialize_with = "empty_as_none")]
    pub parent_id: Option<Uuid>,
}

/// Rename folder request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFolderRequest {
    /// New folder name.
    #[validate(length(min = 1, message = "Folder name is required"))]
    pub name: String,
}

/// Rename file request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameFileRequest {
    /// New display name.
    #[validate(length(min = 1, message = "File name is required"))]
    pub name: String,
}

/// `?parentId=` for folder listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderListQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub parent_id: Option<Uuid>,
}

/// `?folderId=` for breadcrumbs and contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderScopeQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub folder_id: Option<Uuid>,
}

/// `?folderId=&allFiles=` for file listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub folder_id: Option<Uuid>,
    /// List every file of the caller regardless of folder.
    #[serde(default)]
    pub all_files: bool,
}
