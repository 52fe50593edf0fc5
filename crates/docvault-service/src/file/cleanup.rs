//! Best-effort blob removal.
//!
//! Record-store state wins over object-store state: a blob that cannot be
//! deleted is logged and left behind, and the record removal goes ahead.

use docvault_core::result::AppResult;
use docvault_core::types::Locator;
use docvault_database::FileStore;
use docvault_entity::file::File;
use docvault_storage::StorageManager;
use tracing::warn;

/// Delete a blob, logging instead of failing. Returns whether it succeeded.
pub async fn discard_blob(storage: &StorageManager, locator: &Locator) -> bool {
    match storage.delete(locator).await {
        Ok(()) => true,
        Err(e) => {
            warn!(%locator, error = %e, "Failed to delete blob; leaving it orphaned");
            false
        }
    }
}

/// Remove a file's blob (best-effort) and then its record.
pub async fn purge_file(files: &dyn FileStore, storage: &StorageManager, file: &File) -> AppResult<()> {
    discard_blob(storage, &file.locator()).await;
    files.delete(file.owner_id, file.id).await?;
    Ok(())
}
