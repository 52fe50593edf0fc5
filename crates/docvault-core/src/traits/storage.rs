//! Storage provider trait for pluggable object store backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;
use crate::types::{Locator, StorageBackend};

/// Trait for object store backends.
///
/// Implementations exist for the local filesystem and the cloud blob
/// service. The trait is defined here in `docvault-core` and implemented
/// in `docvault-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// The backend this provider serves.
    fn backend(&self) -> StorageBackend;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store `data` under `key` and return the locator of the new blob.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<Locator>;

    /// Read a blob fully into memory.
    async fn get(&self, locator: &Locator) -> AppResult<Bytes>;

    /// Delete a blob. Deleting a blob that does not exist succeeds.
    async fn delete(&self, locator: &Locator) -> AppResult<()>;

    /// Check whether a blob exists.
    async fn exists(&self, locator: &Locator) -> AppResult<bool>;
}
