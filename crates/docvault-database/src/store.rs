//! Record store traits.
//!
//! Every lookup is scoped to an owner: a row that belongs to somebody
//! else is indistinguishable from a row that does not exist.

use async_trait::async_trait;
use uuid::Uuid;

use docvault_core::result::AppResult;
use docvault_entity::file::{CreateFile, File};
use docvault_entity::folder::{CreateFolder, Folder, FolderRename, FolderSummary};
use docvault_entity::user::{CreateUser, User};

/// Which files a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileScope {
    /// Direct children of a folder, or of the root when `None`.
    Folder(Option<Uuid>),
    /// Every file the owner has.
    All,
}

/// Persistence for users.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email, ignoring case.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert the user unless one with the same email exists; return the stored row.
    async fn upsert_by_email(&self, data: &CreateUser) -> AppResult<User>;
}

/// Persistence for folders.
#[async_trait]
pub trait FolderStore: Send + Sync + 'static {
    /// Find a folder by ID.
    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<Folder>>;

    /// Find a sibling folder by exact name.
    async fn find_by_name(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<Folder>>;

    /// List direct children ordered by name.
    async fn list_children(&self, owner_id: Uuid, parent_id: Option<Uuid>)
    -> AppResult<Vec<Folder>>;

    /// List direct children with their content counts, ordered by name.
    async fn list_summaries(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<FolderSummary>>;

    /// Insert a folder. A sibling with the same name yields a Conflict error.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Rename a folder. A sibling with the same name yields a Conflict error.
    ///
    /// Descendant paths are rewritten from the old child prefix to the new
    /// one as part of the same change: either both land or neither does.
    async fn rename(&self, owner_id: Uuid, id: Uuid, name: &str) -> AppResult<FolderRename>;

    /// Delete a folder. Child rows cascade.
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<bool>;
}

/// Persistence for files.
#[async_trait]
pub trait FileStore: Send + Sync + 'static {
    /// Find a file by ID.
    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<File>>;

    /// Find a sibling file by exact name.
    async fn find_by_name(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<File>>;

    /// List files ordered by name.
    async fn list(&self, owner_id: Uuid, scope: FileScope) -> AppResult<Vec<File>>;

    /// Insert a file. A sibling with the same name yields a Conflict error.
    async fn create(&self, data: &CreateFile) -> AppResult<File>;

    /// Rename a file. A sibling with the same name yields a Conflict error.
    async fn rename(&self, owner_id: Uuid, id: Uuid, name: &str) -> AppResult<File>;

    /// Delete a file record.
    async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<bool>;
}
