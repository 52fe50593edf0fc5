//! # docvault-service
//!
//! Business logic for DocVault. Each service is built from injected
//! record stores (`Arc<dyn ...Store>`) and the shared [`StorageManager`],
//! so the whole layer runs unchanged over PostgreSQL or the in-memory
//! stores.
//!
//! [`StorageManager`]: docvault_storage::StorageManager

pub mod context;
pub mod file;
pub mod folder;
pub mod naming;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use context::RequestContext;
pub use file::{
    ConflictResolver, DownloadService, FileContent, FileService, Resolution, UploadOutcome,
    UploadRequest, UploadService,
};
pub use folder::{BreadcrumbService, FolderDeletion, FolderService, resolve_path};
pub use user::UserService;
