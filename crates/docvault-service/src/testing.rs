//! Shared fixtures for service tests.

use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use docvault_core::config::{FolderConfig, StorageConfig};
use docvault_core::types::StorageBackend;
use docvault_database::FolderStore;
use docvault_database::memory::MemoryStore;
use docvault_entity::file::{ConflictStrategy, File};
use docvault_entity::folder::{CreateFolder, Folder};
use docvault_storage::StorageManager;
use docvault_storage::providers::MemoryStorageProvider;

use crate::context::RequestContext;
use crate::file::{
    ConflictResolver, DownloadService, FileService, UploadOutcome, UploadRequest, UploadService,
};
use crate::folder::{BreadcrumbService, FolderService, resolve_path};

pub(crate) struct Fixture {
    pub store: Arc<MemoryStore>,
    pub blobs: Arc<MemoryStorageProvider>,
    pub storage: Arc<StorageManager>,
    pub ctx: RequestContext,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_backend(StorageBackend::Local)
    }

    pub fn with_backend(backend: StorageBackend) -> Self {
        let blobs = Arc::new(MemoryStorageProvider::new(backend));
        let storage = Arc::new(StorageManager::new(blobs.clone()));
        Self {
            store: Arc::new(MemoryStore::new()),
            blobs,
            storage,
            ctx: RequestContext::new(Uuid::new_v4(), "owner@example.com"),
        }
    }

    pub fn folders(&self) -> FolderService {
        self.folders_with(FolderConfig::default())
    }

    pub fn folders_with(&self, config: FolderConfig) -> FolderService {
        FolderService::new(
            self.store.clone(),
            self.store.clone(),
            self.storage.clone(),
            config,
        )
    }

    pub fn breadcrumbs(&self) -> BreadcrumbService {
        BreadcrumbService::new(self.store.clone())
    }

    pub fn files(&self) -> FileService {
        FileService::new(self.store.clone(), self.store.clone(), self.storage.clone())
    }

    pub fn downloads(&self, redirect_reads: bool) -> DownloadService {
        DownloadService::new(self.store.clone(), self.storage.clone(), redirect_reads)
    }

    pub fn resolver(&self) -> ConflictResolver {
        ConflictResolver::new(self.store.clone())
    }

    pub fn uploads(&self) -> UploadService {
        UploadService::new(
            self.store.clone(),
            self.store.clone(),
            self.storage.clone(),
            StorageConfig::default(),
        )
    }

    /// Insert a folder directly through the store.
    pub async fn folder(&self, parent: Option<&Folder>, name: &str) -> Folder {
        FolderStore::create(
            self.store.as_ref(),
            &CreateFolder {
                name: name.to_string(),
                path: resolve_path(parent),
                parent_id: parent.map(|p| p.id),
                owner_id: self.ctx.user_id,
            },
        )
        .await
        .unwrap()
    }

    /// Upload a small PDF and unwrap the created record.
    pub async fn upload(
        &self,
        folder: Option<&Folder>,
        name: &str,
        strategy: Option<ConflictStrategy>,
    ) -> UploadOutcome {
        self.uploads()
            .upload(&self.ctx, pdf(folder, name, strategy))
            .await
            .unwrap()
    }

    pub async fn uploaded(&self, folder: Option<&Folder>, name: &str) -> File {
        match self.upload(folder, name, None).await {
            UploadOutcome::Created(file) => file,
            other => panic!("expected created upload, got {other:?}"),
        }
    }
}

pub(crate) fn pdf(
    folder: Option<&Folder>,
    name: &str,
    strategy: Option<ConflictStrategy>,
) -> UploadRequest {
    UploadRequest {
        data: Bytes::from_static(b"%PDF-1.7 test"),
        original_name: name.to_string(),
        mime_type: "application/pdf".to_string(),
        folder_id: folder.map(|f| f.id),
        strategy,
    }
}
