//! In-memory record store.
//!
//! Implements every store trait over a single lock-protected state so the
//! service and HTTP layers can run without PostgreSQL. It reproduces the
//! schema's sibling-name unique indexes, its parent foreign keys, and the
//! `ON DELETE CASCADE` behavior.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_entity::file::{CreateFile, File};
use docvault_entity::folder::{CreateFolder, Folder, FolderRename, FolderSummary};
use docvault_entity::user::{CreateUser, User};

use crate::store::{FileScope, FileStore, FolderStore, UserStore};

#[derive(Debug, Default)]
struct State {
    users: HashMap<Uuid, User>,
    folders: HashMap<Uuid, Folder>,
    files: HashMap<Uuid, File>,
}

impl State {
    fn folder_name_taken(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
        except: Option<Uuid>,
    ) -> bool {
        self.folders.values().any(|f| {
            f.owner_id == owner_id
                && f.parent_id == parent_id
                && f.name == name
                && Some(f.id) != except
        })
    }

    fn file_name_taken(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        name: &str,
        except: Option<Uuid>,
    ) -> bool {
        self.files.values().any(|f| {
            f.owner_id == owner_id
                && f.folder_id == folder_id
                && f.name == name
                && Some(f.id) != except
        })
    }

    /// Remove a folder and everything below it.
    fn cascade_delete(&mut self, id: Uuid) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            self.folders.remove(&current);
            self.files.retain(|_, f| f.folder_id != Some(current));
            pending.extend(
                self.folders
                    .values()
                    .filter(|f| f.parent_id == Some(current))
                    .map(|f| f.id),
            );
        }
    }
}

/// Record store that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of folder records across all owners.
    pub async fn folder_count(&self) -> usize {
        self.state.read().await.folders.len()
    }

    /// Number of file records across all owners.
    pub async fn file_count(&self) -> usize {
        self.state.read().await.files.len()
    }

    /// Insert a folder row as-is, skipping the foreign-key and uniqueness
    /// checks. Used to seed trees with dangling parent links.
    pub async fn insert_folder_unchecked(&self, folder: Folder) {
        self.state.write().await.folders.insert(folder.id, folder);
    }
}

fn sorted_by_name<T>(mut rows: Vec<T>, name: impl Fn(&T) -> &str) -> Vec<T> {
    rows.sort_by(|a, b| name(a).cmp(name(b)));
    rows
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .state
            .read()
            .await
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn upsert_by_email(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.write().await;
        if let Some(existing) = state
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(&data.email))
        {
            return Ok(existing.clone());
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: data.email.clone(),
            name: data.name.clone(),
            image: data.image.clone(),
            created_at: now,
            updated_at: now,
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self
            .state
            .read()
            .await
            .folders
            .get(&id)
            .filter(|f| f.owner_id == owner_id)
            .cloned())
    }

    async fn find_by_name(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<Folder>> {
        Ok(self
            .state
            .read()
            .await
            .folders
            .values()
            .find(|f| f.owner_id == owner_id && f.parent_id == parent_id && f.name == name)
            .cloned())
    }

    async fn list_children(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<Folder>> {
        let state = self.state.read().await;
        let rows: Vec<Folder> = state
            .folders
            .values()
            .filter(|f| f.owner_id == owner_id && f.parent_id == parent_id)
            .cloned()
            .collect();
        Ok(sorted_by_name(rows, |f: &Folder| f.name.as_str()))
    }

    async fn list_summaries(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> AppResult<Vec<FolderSummary>> {
        let state = self.state.read().await;
        let rows: Vec<FolderSummary> = state
            .folders
            .values()
            .filter(|f| f.owner_id == owner_id && f.parent_id == parent_id)
            .map(|f| FolderSummary {
                folder: f.clone(),
                child_count: state
                    .folders
                    .values()
                    .filter(|c| c.parent_id == Some(f.id))
                    .count() as i64,
                file_count: state
                    .files
                    .values()
                    .filter(|c| c.folder_id == Some(f.id))
                    .count() as i64,
            })
            .collect();
        Ok(sorted_by_name(rows, |s: &FolderSummary| s.folder.name.as_str()))
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let mut state = self.state.write().await;
        if let Some(parent_id) = data.parent_id {
            if !state.folders.contains_key(&parent_id) {
                return Err(AppError::database(format!(
                    "Parent folder {parent_id} violates foreign key"
                )));
            }
        }
        if state.folder_name_taken(data.owner_id, data.parent_id, &data.name, None) {
            return Err(AppError::conflict(format!(
                "A folder named '{}' already exists in this location",
                data.name
            )));
        }

        let now = Utc::now();
        let folder = Folder {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            path: data.path.clone(),
            parent_id: data.parent_id,
            owner_id: data.owner_id,
            created_at: now,
            updated_at: now,
        };
        state.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn rename(&self, owner_id: Uuid, id: Uuid, name: &str) -> AppResult<FolderRename> {
        let mut state = self.state.write().await;
        let (parent_id, old_prefix) = match state.folders.get(&id) {
            Some(f) if f.owner_id == owner_id => (f.parent_id, f.child_path()),
            _ => return Err(AppError::not_found(format!("Folder {id} not found"))),
        };
        if state.folder_name_taken(owner_id, parent_id, name, Some(id)) {
            return Err(AppError::conflict(format!(
                "A folder named '{name}' already exists in this location"
            )));
        }

        let folder = state
            .folders
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        let now = Utc::now();
        folder.name = name.to_string();
        folder.updated_at = now;
        let renamed = folder.clone();
        let new_prefix = renamed.child_path();

        let mut descendants = 0;
        for folder in state.folders.values_mut().filter(|f| f.owner_id == owner_id) {
            if let Some(rest) = folder.path.strip_prefix(old_prefix.as_str()) {
                folder.path = format!("{new_prefix}{rest}");
                folder.updated_at = now;
                descendants += 1;
            }
        }
        Ok(FolderRename {
            folder: renamed,
            descendants,
        })
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let owned = state.folders.get(&id).is_some_and(|f| f.owner_id == owner_id);
        if owned {
            state.cascade_delete(id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn find_by_id(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<File>> {
        Ok(self
            .state
            .read()
            .await
            .files
            .get(&id)
            .filter(|f| f.owner_id == owner_id)
            .cloned())
    }

    async fn find_by_name(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        name: &str,
    ) -> AppResult<Option<File>> {
        Ok(self
            .state
            .read()
            .await
            .files
            .values()
            .find(|f| f.owner_id == owner_id && f.folder_id == folder_id && f.name == name)
            .cloned())
    }

    async fn list(&self, owner_id: Uuid, scope: FileScope) -> AppResult<Vec<File>> {
        let state = self.state.read().await;
        let rows: Vec<File> = state
            .files
            .values()
            .filter(|f| f.owner_id == owner_id)
            .filter(|f| match scope {
                FileScope::Folder(folder_id) => f.folder_id == folder_id,
                FileScope::All => true,
            })
            .cloned()
            .collect();
        Ok(sorted_by_name(rows, |f: &File| f.name.as_str()))
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let mut state = self.state.write().await;
        if let Some(folder_id) = data.folder_id {
            if !state.folders.contains_key(&folder_id) {
                return Err(AppError::database(format!(
                    "Folder {folder_id} violates foreign key"
                )));
            }
        }
        if state.file_name_taken(data.owner_id, data.folder_id, &data.name, None) {
            return Err(AppError::conflict(format!(
                "A file named '{}' already exists in this location",
                data.name
            )));
        }

        let now = Utc::now();
        let file = File {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            original_name: data.original_name.clone(),
            mime_type: data.mime_type.clone(),
            size_bytes: data.size_bytes,
            storage_backend: data.locator.backend(),
            storage_locator: data.locator.address().to_string(),
            folder_id: data.folder_id,
            owner_id: data.owner_id,
            created_at: now,
            updated_at: now,
        };
        state.files.insert(file.id, file.clone());
        Ok(file)
    }

    async fn rename(&self, owner_id: Uuid, id: Uuid, name: &str) -> AppResult<File> {
        let mut state = self.state.write().await;
        let folder_id = match state.files.get(&id) {
            Some(f) if f.owner_id == owner_id => f.folder_id,
            _ => return Err(AppError::not_found(format!("File {id} not found"))),
        };
        if state.file_name_taken(owner_id, folder_id, name, Some(id)) {
            return Err(AppError::conflict(format!(
                "A file named '{name}' already exists in this location"
            )));
        }

        let file = state
            .files
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;
        file.name = name.to_string();
        file.updated_at = Utc::now();
        Ok(file.clone())
    }

    async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let owned = state.files.get(&id).is_some_and(|f| f.owner_id == owner_id);
        if owned {
            state.files.remove(&id);
        }
        Ok(owned)
    }
}
