//! File listing, rename and delete.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_database::{FileScope, FileStore, FolderStore};
use docvault_entity::file::File;
use docvault_storage::StorageManager;

use super::cleanup::purge_file;
use crate::context::RequestContext;
use crate::naming::{NameKind, validate_name};

/// Handles file CRUD operations.
#[derive(Clone)]
pub struct FileService {
    /// File store.
    files: Arc<dyn FileStore>,
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// Storage manager.
    storage: Arc<StorageManager>,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService").finish()
    }
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: Arc<dyn FileStore>,
        folders: Arc<dyn FolderStore>,
        storage: Arc<StorageManager>,
    ) -> Self {
        Self {
            files,
            folders,
            storage,
        }
    }

    /// Gets a file by ID.
    pub async fn get_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        self.files
            .find_by_id(ctx.user_id, file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))
    }

    /// Lists files directly in `folder_id`, or every file when `all_files`.
    pub async fn list_files(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
        all_files: bool,
    ) -> AppResult<Vec<File>> {
        let scope = if all_files {
            FileScope::All
        } else {
            if let Some(id) = folder_id {
                self.folders
                    .find_by_id(ctx.user_id, id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Folder not found"))?;
            }
            FileScope::Folder(folder_id)
        };
        self.files.list(ctx.user_id, scope).await
    }

    /// Renames a file within its folder.
    pub async fn rename_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        new_name: &str,
    ) -> AppResult<File> {
        let file = self.get_file(ctx, file_id).await?;
        let new_name = validate_name(NameKind::File, new_name)?;

        if new_name == file.name {
            return Ok(file);
        }

        if let Some(sibling) = self
            .files
            .find_by_name(ctx.user_id, file.folder_id, &new_name)
            .await?
        {
            if sibling.id != file.id {
                return Err(AppError::conflict(format!(
                    "A file named '{new_name}' already exists in this location"
                )));
            }
        }

        let renamed = self.files.rename(ctx.user_id, file_id, &new_name).await?;

        info!(
            owner_id = %ctx.user_id,
            file_id = %file_id,
            old_name = %file.name,
            new_name = %renamed.name,
            "File renamed"
        );

        Ok(renamed)
    }

    /// Deletes a file. The blob removal is best-effort.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<()> {
        let file = self.get_file(ctx, file_id).await?;
        purge_file(self.files.as_ref(), &self.storage, &file).await?;

        info!(
            owner_id = %ctx.user_id,
            file_id = %file_id,
            name = %file.name,
            "File deleted"
        );

        Ok(())
    }
}
