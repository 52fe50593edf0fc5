//! File content retrieval.

use std::sync::Arc;

use bytes::Bytes;
use uuid::Uuid;

use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::types::Locator;
use docvault_database::FileStore;
use docvault_storage::StorageManager;

use crate::context::RequestContext;

/// What the caller gets back for a content request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// The bytes themselves.
    Inline {
        bytes: Bytes,
        mime_type: String,
        file_name: String,
    },
    /// The blob is publicly readable at `url`.
    Redirect { url: String },
}

/// Serves file content to its owner.
#[derive(Clone)]
pub struct DownloadService {
    files: Arc<dyn FileStore>,
    storage: Arc<StorageManager>,
    /// Answer cloud-resident files with a redirect instead of proxying.
    redirect_reads: bool,
}

impl std::fmt::Debug for DownloadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadService")
            .field("redirect_reads", &self.redirect_reads)
            .finish()
    }
}

impl DownloadService {
    pub fn new(
        files: Arc<dyn FileStore>,
        storage: Arc<StorageManager>,
        redirect_reads: bool,
    ) -> Self {
        Self {
            files,
            storage,
            redirect_reads,
        }
    }

    /// Fetch a file's content.
    pub async fn content(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<FileContent> {
        let file = self
            .files
            .find_by_id(ctx.user_id, file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        let locator = file.locator();
        if let Locator::Cloud { url } = &locator {
            if self.redirect_reads {
                return Ok(FileContent::Redirect { url: url.clone() });
            }
        }

        let bytes = self.storage.get(&locator).await.map_err(|e| {
            if e.is(ErrorKind::NotFound) {
                AppError::not_found("File content not found")
            } else {
                e
            }
        })?;

        Ok(FileContent::Inline {
            bytes,
            mime_type: file.mime_type,
            file_name: file.original_name,
        })
    }
}
