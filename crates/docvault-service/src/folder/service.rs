//! Folder CRUD operations over the owner's tree.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use docvault_core::config::FolderConfig;
use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_database::{FileScope, FileStore, FolderStore};
use docvault_entity::Item;
use docvault_entity::folder::{CreateFolder, Folder, FolderRename, FolderSummary};
use docvault_storage::StorageManager;

use crate::context::RequestContext;
use crate::file::cleanup::purge_file;
use crate::naming::{NameKind, validate_name};

use super::path::resolve_path;

/// Manages folder CRUD operations.
#[derive(Clone)]
pub struct FolderService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// File store, for listings and cascading deletes.
    files: Arc<dyn FileStore>,
    /// Storage manager, for blob cleanup on delete.
    storage: Arc<StorageManager>,
    /// Folder settings.
    config: FolderConfig,
}

impl std::fmt::Debug for FolderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderService")
            .field("config", &self.config)
            .finish()
    }
}

/// What a cascading delete removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FolderDeletion {
    /// Folder records removed, the target included.
    pub folders: usize,
    /// File records removed.
    pub files: usize,
}

fn already_exists(name: &str) -> AppError {
    AppError::conflict(format!(
        "A folder named '{name}' already exists in this location"
    ))
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        storage: Arc<StorageManager>,
        config: FolderConfig,
    ) -> Self {
        Self {
            folders,
            files,
            storage,
            config,
        }
    }

    /// Gets a folder by ID.
    pub async fn get_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
        self.folders
            .find_by_id(ctx.user_id, folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    /// Fail with NotFound unless `folder_id` is the root or an owned folder.
    async fn require_scope(&self, ctx: &RequestContext, folder_id: Option<Uuid>) -> AppResult<()> {
        if let Some(id) = folder_id {
            self.get_folder(ctx, id).await?;
        }
        Ok(())
    }

    /// Lists the direct child folders of `parent_id` with their content counts.
    pub async fn list_folders(
        &self,
        ctx: &RequestContext,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<FolderSummary>> {
        self.require_scope(ctx, parent_id).await?;
        self.folders.list_summaries(ctx.user_id, parent_id).await
    }

    /// Lists a folder's contents: child folders first, then files, each by name.
    pub async fn list_contents(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<Item>> {
        self.require_scope(ctx, folder_id).await?;
        let folders = self.folders.list_summaries(ctx.user_id, folder_id).await?;
        let files = self
            .files
            .list(ctx.user_id, FileScope::Folder(folder_id))
            .await?;

        let mut items = Vec::with_capacity(folders.len() + files.len());
        items.extend(folders.into_iter().map(Item::Folder));
        items.extend(files.into_iter().map(Item::File));
        Ok(items)
    }

    /// Creates a new folder under `parent_id` (or at the root).
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> AppResult<Folder> {
        let name = validate_name(NameKind::Folder, name)?;

        let parent = match parent_id {
            Some(id) => match self.folders.find_by_id(ctx.user_id, id).await? {
                Some(parent) => Some(parent),
                None if self.config.reject_unknown_parent => {
                    return Err(AppError::not_found("Parent folder not found"));
                }
                None => {
                    warn!(
                        owner_id = %ctx.user_id,
                        parent_id = %id,
                        "Unknown parent folder; creating at root"
                    );
                    None
                }
            },
            None => None,
        };
        let parent_id = parent.as_ref().map(|p| p.id);

        if self
            .folders
            .find_by_name(ctx.user_id, parent_id, &name)
            .await?
            .is_some()
        {
            return Err(already_exists(&name));
        }

        let folder = self
            .folders
            .create(&CreateFolder {
                path: resolve_path(parent.as_ref()),
                name,
                parent_id,
                owner_id: ctx.user_id,
            })
            .await?;

        info!(
            owner_id = %ctx.user_id,
            folder_id = %folder.id,
            path = %folder.path,
            name = %folder.name,
            "Folder created"
        );

        Ok(folder)
    }

    /// Renames a folder and rewrites the stored paths below it.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_name: &str,
    ) -> AppResult<Folder> {
        let folder = self.get_folder(ctx, folder_id).await?;
        let new_name = validate_name(NameKind::Folder, new_name)?;

        if new_name == folder.name {
            return Ok(folder);
        }

        if let Some(sibling) = self
            .folders
            .find_by_name(ctx.user_id, folder.parent_id, &new_name)
            .await?
        {
            if sibling.id != folder.id {
                return Err(already_exists(&new_name));
            }
        }

        let FolderRename {
            folder: renamed,
            descendants,
        } = self
            .folders
            .rename(ctx.user_id, folder_id, &new_name)
            .await?;

        info!(
            owner_id = %ctx.user_id,
            folder_id = %folder_id,
            old_name = %folder.name,
            new_name = %renamed.name,
            descendants,
            "Folder renamed"
        );

        Ok(renamed)
    }

    /// Deletes a folder and everything below it.
    ///
    /// Files are purged folder by folder, deepest folders first, so no
    /// record is removed while rows referencing it remain. Blob deletion
    /// is best-effort.
    pub async fn delete_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<FolderDeletion> {
        let root = self.get_folder(ctx, folder_id).await?;

        // Pre-order walk; processing it in reverse visits children before parents.
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![root];
        while let Some(folder) = stack.pop() {
            if !seen.insert(folder.id) {
                continue;
            }
            let children = self
                .folders
                .list_children(ctx.user_id, Some(folder.id))
                .await?;
            stack.extend(children);
            order.push(folder);
        }

        let mut deletion = FolderDeletion::default();
        for folder in order.iter().rev() {
            let files = self
                .files
                .list(ctx.user_id, FileScope::Folder(Some(folder.id)))
                .await?;
            for file in &files {
                purge_file(self.files.as_ref(), &self.storage, file).await?;
                deletion.files += 1;
            }

            match self.folders.delete(ctx.user_id, folder.id).await {
                Ok(true) => deletion.folders += 1,
                Ok(false) => {}
                Err(e) if e.is(ErrorKind::NotFound) => {}
                Err(e) => return Err(e),
            }
        }

        info!(
            owner_id = %ctx.user_id,
            folder_id = %folder_id,
            folders = deletion.folders,
            files = deletion.files,
            "Folder deleted"
        );

        Ok(deletion)
    }
}
