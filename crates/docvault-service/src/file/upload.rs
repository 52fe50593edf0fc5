//! Upload orchestration: validate, resolve the display name, write the
//! blob, then record it.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use docvault_core::config::StorageConfig;
use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_database::{FileStore, FolderStore};
use docvault_entity::file::{ConflictStrategy, CreateFile, File};
use docvault_storage::{StorageManager, generate_storage_key};

use super::cleanup::discard_blob;
use super::conflict::{ConflictResolver, Resolution};
use crate::context::RequestContext;
use crate::naming::{NameKind, validate_name};

/// One uploaded file as received from the caller.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// File content bytes.
    pub data: Bytes,
    /// Name the caller uploaded the file under.
    pub original_name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// Target folder (None for root).
    pub folder_id: Option<Uuid>,
    /// How to handle an existing sibling with the same name.
    pub strategy: Option<ConflictStrategy>,
}

/// How an upload ended.
#[derive(Debug, Clone)]
pub enum UploadOutcome {
    /// The file was stored and recorded.
    Created(File),
    /// A sibling already uses the name; resubmit with a strategy.
    Conflict { file_name: String },
    /// The caller chose to cancel; nothing was written.
    Cancelled,
}

/// Handles single-request file uploads.
#[derive(Clone)]
pub struct UploadService {
    /// File store.
    files: Arc<dyn FileStore>,
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// Storage manager.
    storage: Arc<StorageManager>,
    /// Name conflict resolver.
    resolver: ConflictResolver,
    /// Storage configuration.
    config: StorageConfig,
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService")
            .field("max_upload_size_bytes", &self.config.max_upload_size_bytes)
            .field("allowed_mime_types", &self.config.allowed_mime_types)
            .finish()
    }
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        files: Arc<dyn FileStore>,
        folders: Arc<dyn FolderStore>,
        storage: Arc<StorageManager>,
        config: StorageConfig,
    ) -> Self {
        let resolver = ConflictResolver::new(files.clone());
        Self {
            files,
            folders,
            storage,
            resolver,
            config,
        }
    }

    /// Maximum accepted upload size in bytes.
    pub fn max_upload_size(&self) -> u64 {
        self.config.max_upload_size_bytes
    }

    fn validate(&self, req: &UploadRequest) -> AppResult<String> {
        if !self
            .config
            .allowed_mime_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&req.mime_type))
        {
            return Err(AppError::validation(format!(
                "File type '{}' is not allowed; accepted: {}",
                req.mime_type,
                self.config.allowed_mime_types.join(", ")
            )));
        }

        if req.data.len() as u64 > self.config.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File size must be less than {}MB",
                self.config.max_upload_size_bytes / (1024 * 1024)
            )));
        }

        validate_name(NameKind::File, &req.original_name)
    }

    /// Upload a file.
    ///
    /// A name collision without a strategy is reported as
    /// [`UploadOutcome::Conflict`] before anything is written. If the
    /// record insert fails after the blob landed, the blob is removed
    /// again. An overwritten file is only removed once the new blob is
    /// stored.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        req: UploadRequest,
    ) -> AppResult<UploadOutcome> {
        let original_name = self.validate(&req)?;

        if let Some(folder_id) = req.folder_id {
            self.folders
                .find_by_id(ctx.user_id, folder_id)
                .await?
                .ok_or_else(|| AppError::not_found("Target folder not found"))?;
        }

        let (final_name, replaced) = match self
            .resolver
            .resolve(ctx, req.folder_id, &original_name, req.strategy)
            .await?
        {
            Resolution::Proceed { final_name } => (final_name, None),
            Resolution::Replace {
                final_name,
                existing,
            } => (final_name, Some(existing)),
            Resolution::Conflict { name } => {
                info!(owner_id = %ctx.user_id, name = %name, "Upload name conflict");
                return Ok(UploadOutcome::Conflict { file_name: name });
            }
            Resolution::Cancelled => {
                info!(owner_id = %ctx.user_id, name = %original_name, "Upload cancelled");
                return Ok(UploadOutcome::Cancelled);
            }
        };

        let key = generate_storage_key(&original_name);
        let size_bytes = req.data.len() as i64;
        let locator = self.storage.put(&key, req.data, &req.mime_type).await?;

        if let Some(existing) = &replaced {
            if let Err(e) = self.files.delete(existing.owner_id, existing.id).await {
                discard_blob(&self.storage, &locator).await;
                return Err(e);
            }
        }

        let record = CreateFile {
            name: final_name,
            original_name,
            mime_type: req.mime_type,
            size_bytes,
            locator,
            folder_id: req.folder_id,
            owner_id: ctx.user_id,
        };

        let file = match self.files.create(&record).await {
            Ok(file) => file,
            Err(e) => {
                warn!(
                    owner_id = %ctx.user_id,
                    locator = %record.locator,
                    error = %e,
                    "File record insert failed; removing blob"
                );
                discard_blob(&self.storage, &record.locator).await;
                if let Some(existing) = &replaced {
                    warn!(
                        owner_id = %ctx.user_id,
                        file_id = %existing.id,
                        locator = %existing.locator(),
                        "Replaced file record removed without a successor"
                    );
                }
                if e.is(ErrorKind::Conflict) {
                    return Ok(UploadOutcome::Conflict {
                        file_name: record.name,
                    });
                }
                return Err(e);
            }
        };

        if let Some(existing) = &replaced {
            discard_blob(&self.storage, &existing.locator()).await;
            info!(
                owner_id = %ctx.user_id,
                file_id = %existing.id,
                name = %existing.name,
                "Existing file replaced by upload"
            );
        }

        info!(
            owner_id = %ctx.user_id,
            file_id = %file.id,
            name = %file.name,
            size = file.size_bytes,
            backend = %file.storage_backend,
            "Upload completed"
        );

        Ok(UploadOutcome::Created(file))
    }
}
