//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use docvault_auth::IdentityVerifier;
use docvault_core::config::AppConfig;
use docvault_database::{FileStore, FolderStore, UserStore};
use docvault_service::{
    BreadcrumbService, DownloadService, FileService, FolderService, UploadService, UserService,
};
use docvault_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Object store manager
    pub storage: Arc<StorageManager>,
    /// Identity token verifier
    pub verifier: Arc<IdentityVerifier>,

    // ── Services ─────────────────────────────────────────────
    /// Lazy user materialization
    pub user_service: Arc<UserService>,
    /// Folder tree operations
    pub folder_service: Arc<FolderService>,
    /// Breadcrumb trails
    pub breadcrumb_service: Arc<BreadcrumbService>,
    /// File listing, rename and delete
    pub file_service: Arc<FileService>,
    /// Upload orchestration
    pub upload_service: Arc<UploadService>,
    /// Content retrieval
    pub download_service: Arc<DownloadService>,
}

impl AppState {
    /// Wire every service over the given record stores and object store.
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        storage: Arc<StorageManager>,
    ) -> Self {
        let verifier = Arc::new(IdentityVerifier::new(&config.auth));

        let folder_service = FolderService::new(
            folders.clone(),
            files.clone(),
            storage.clone(),
            config.folders.clone(),
        );
        let upload_service = UploadService::new(
            files.clone(),
            folders.clone(),
            storage.clone(),
            config.storage.clone(),
        );
        let download_service = DownloadService::new(
            files.clone(),
            storage.clone(),
            config.storage.cloud.redirect_reads,
        );

        Self {
            user_service: Arc::new(UserService::new(users)),
            breadcrumb_service: Arc::new(BreadcrumbService::new(folders.clone())),
            file_service: Arc::new(FileService::new(files, folders, storage.clone())),
            folder_service: Arc::new(folder_service),
            upload_service: Arc::new(upload_service),
            download_service: Arc::new(download_service),
            verifier,
            storage,
            config: Arc::new(config),
        }
    }
}
