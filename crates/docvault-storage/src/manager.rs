//! Storage manager: picks the backend for new writes and routes reads and
//! deletes to the backend named by each locator.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, info};

use docvault_core::config::{ProviderSelection, StorageConfig};
use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_core::traits::StorageProvider;
use docvault_core::types::{Locator, StorageBackend};

use crate::providers::LocalStorageProvider;

/// Central storage manager that holds every configured provider.
#[derive(Debug, Clone)]
pub struct StorageManager {
    /// Map of backend → provider instance.
    providers: HashMap<StorageBackend, Arc<dyn StorageProvider>>,
    /// The backend that receives new uploads.
    active: StorageBackend,
}

impl StorageManager {
    /// Create a manager whose active (write) backend is `provider`.
    pub fn new(provider: Arc<dyn StorageProvider>) -> Self {
        let active = provider.backend();
        let mut providers = HashMap::new();
        providers.insert(active, provider);
        Self { providers, active }
    }

    /// Register an additional provider used only for reads and deletes of
    /// existing blobs. The active provider is never replaced.
    pub fn with_provider(mut self, provider: Arc<dyn StorageProvider>) -> Self {
        self.providers.entry(provider.backend()).or_insert(provider);
        self
    }

    /// Build the manager from configuration.
    ///
    /// The local provider is always available for reading existing blobs.
    /// The cloud provider is registered whenever a token is configured.
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let active = select_backend(config)?;
        let local: Arc<dyn StorageProvider> =
            Arc::new(LocalStorageProvider::new(&config.local.root_path).await?);

        #[cfg(feature = "cloud")]
        let cloud: Option<Arc<dyn StorageProvider>> = if config.cloud.is_configured() {
            Some(Arc::new(crate::providers::BlobStorageProvider::new(
                &config.cloud,
            )?))
        } else {
            None
        };
        #[cfg(not(feature = "cloud"))]
        let cloud: Option<Arc<dyn StorageProvider>> = None;

        let manager = match (active, cloud) {
            (StorageBackend::Cloud, Some(cloud)) => Self::new(cloud).with_provider(local),
            (StorageBackend::Cloud, None) => {
                return Err(AppError::configuration(
                    "Cloud storage selected but no cloud provider is available",
                ));
            }
            (StorageBackend::Local, Some(cloud)) => Self::new(local).with_provider(cloud),
            (StorageBackend::Local, None) => Self::new(local),
        };

        info!(active = %manager.active, "Storage manager initialized");
        Ok(manager)
    }

    /// The backend that receives new uploads.
    pub fn active_backend(&self) -> StorageBackend {
        self.active
    }

    /// Get the provider responsible for a backend.
    pub fn provider(&self, backend: StorageBackend) -> AppResult<Arc<dyn StorageProvider>> {
        self.providers
            .get(&backend)
            .cloned()
            .ok_or_else(|| AppError::storage(format!("No {backend} storage provider configured")))
    }

    /// Write a new blob to the active backend.
    pub async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<Locator> {
        let locator = self
            .provider(self.active)?
            .put(key, data, content_type)
            .await?;
        debug!(%locator, "Stored blob");
        Ok(locator)
    }

    /// Read a blob from whichever backend holds it.
    pub async fn get(&self, locator: &Locator) -> AppResult<Bytes> {
        self.provider(locator.backend())?.get(locator).await
    }

    /// Delete a blob from whichever backend holds it.
    pub async fn delete(&self, locator: &Locator) -> AppResult<()> {
        self.provider(locator.backend())?.delete(locator).await
    }

    /// Check whether a blob exists on whichever backend holds it.
    pub async fn exists(&self, locator: &Locator) -> AppResult<bool> {
        self.provider(locator.backend())?.exists(locator).await
    }

    /// Check health of all registered providers.
    pub async fn health_check_all(&self) -> HashMap<StorageBackend, bool> {
        let mut results = HashMap::new();
        for (backend, provider) in &self.providers {
            let healthy = provider.health_check().await.unwrap_or(false);
            results.insert(*backend, healthy);
        }
        results
    }
}

/// Decide which backend receives new uploads.
///
/// `auto` prefers the cloud whenever a token is present. When
/// `require_cloud` is set, lacking a token is a configuration error.
pub fn select_backend(config: &StorageConfig) -> AppResult<StorageBackend> {
    let cloud_ready = config.cloud.is_configured();
    if config.require_cloud && !cloud_ready {
        return Err(AppError::configuration(
            "Cloud storage is required but storage.cloud.token is not set",
        ));
    }

    match config.provider {
        ProviderSelection::Local if config.require_cloud => Err(AppError::configuration(
            "storage.provider = \"local\" conflicts with storage.require_cloud",
        )),
        ProviderSelection::Local => Ok(StorageBackend::Local),
        ProviderSelection::Cloud if cloud_ready => Ok(StorageBackend::Cloud),
        ProviderSelection::Cloud => Err(AppError::configuration(
            "storage.provider = \"cloud\" requires storage.cloud.token",
        )),
        ProviderSelection::Auto if cloud_ready => Ok(StorageBackend::Cloud),
        ProviderSelection::Auto => Ok(StorageBackend::Local),
    }
}
