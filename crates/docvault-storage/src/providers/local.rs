//! Local filesystem storage provider.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::traits::StorageProvider;
use docvault_core::types::{Locator, StorageBackend};

/// Stores blobs as plain files under a root directory.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Root directory for all stored files.
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a relative key to a path inside the root. Absolute keys and
    /// keys with `..` components are rejected.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let relative = Path::new(key);
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => {
                    return Err(AppError::validation(format!(
                        "Storage key escapes the storage root: {key}"
                    )));
                }
            }
        }
        if resolved == self.root {
            return Err(AppError::validation("Storage key is empty"));
        }
        Ok(resolved)
    }

    /// Resolve a locator, refusing ones that belong to another backend.
    fn resolve_locator(&self, locator: &Locator) -> AppResult<PathBuf> {
        match locator {
            Locator::Local { key } => self.resolve(key),
            other => Err(AppError::storage(format!(
                "Local storage cannot serve {} locator",
                other.backend()
            ))),
        }
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Local
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false))
    }

    async fn put(&self, key: &str, data: Bytes, _content_type: &str) -> AppResult<Locator> {
        let full_path = self.resolve(key)?;
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {key}"),
                e,
            )
        })?;

        debug!(key, bytes = data.len(), "Wrote blob to local storage");
        Ok(Locator::local(key))
    }

    async fn get(&self, locator: &Locator) -> AppResult<Bytes> {
        let full_path = self.resolve_locator(locator)?;
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Blob not found: {}", locator.address()))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read file: {}", locator.address()),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn delete(&self, locator: &Locator) -> AppResult<()> {
        let full_path = self.resolve_locator(locator)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(key = locator.address(), "Deleted blob from local storage");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete file: {}", locator.address()),
                e,
            )),
        }
    }

    async fn exists(&self, locator: &Locator) -> AppResult<bool> {
        let full_path = self.resolve_locator(locator)?;
        fs::try_exists(&full_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to stat file: {}", locator.address()),
                e,
            )
        })
    }
}
