//! In-memory storage provider.
//!
//! Can impersonate either backend, and can be switched into a mode where
//! deletes fail so callers' best-effort cleanup paths can be exercised.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::traits::StorageProvider;
use docvault_core::types::{Locator, StorageBackend};

/// Keeps blobs in a map keyed by locator.
#[derive(Debug)]
pub struct MemoryStorageProvider {
    backend: StorageBackend,
    blobs: RwLock<HashMap<Locator, Bytes>>,
    fail_deletes: AtomicBool,
    fail_puts: AtomicBool,
    delete_attempts: AtomicUsize,
}

impl MemoryStorageProvider {
    /// Create an empty provider serving the given backend.
    pub fn new(backend: StorageBackend) -> Self {
        Self {
            backend,
            blobs: RwLock::new(HashMap::new()),
            fail_deletes: AtomicBool::new(false),
            fail_puts: AtomicBool::new(false),
            delete_attempts: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent delete fail with a Storage error.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent put fail with a Storage error.
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Number of delete calls received, successful or not.
    pub fn delete_attempts(&self) -> usize {
        self.delete_attempts.load(Ordering::SeqCst)
    }

    /// Number of blobs currently held.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    /// Whether no blobs are held.
    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }

    fn locator_for(&self, key: &str) -> Locator {
        match self.backend {
            StorageBackend::Local => Locator::local(key),
            StorageBackend::Cloud => Locator::cloud(format!("https://memory.blob.test/{key}")),
        }
    }
}

#[async_trait]
impl StorageProvider for MemoryStorageProvider {
    fn backend(&self) -> StorageBackend {
        self.backend
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, key: &str, data: Bytes, _content_type: &str) -> AppResult<Locator> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(AppError::storage(format!("Injected put failure for {key}")));
        }
        let locator = self.locator_for(key);
        self.blobs.write().await.insert(locator.clone(), data);
        Ok(locator)
    }

    async fn get(&self, locator: &Locator) -> AppResult<Bytes> {
        self.blobs
            .read()
            .await
            .get(locator)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Blob not found: {}", locator.address())))
    }

    async fn delete(&self, locator: &Locator) -> AppResult<()> {
        self.delete_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(AppError::storage(format!(
                "Injected delete failure for {}",
                locator.address()
            )));
        }
        self.blobs.write().await.remove(locator);
        Ok(())
    }

    async fn exists(&self, locator: &Locator) -> AppResult<bool> {
        Ok(self.blobs.read().await.contains_key(locator))
    }
}
