//! File operations: listing, rename, delete, content retrieval, and the
//! upload orchestrator with its name conflict resolver.

pub mod cleanup;
pub mod conflict;
pub mod download;
pub mod service;
pub mod upload;

pub use conflict::{ConflictResolver, Resolution};
pub use download::{DownloadService, FileContent};
pub use service::FileService;
pub use upload::{UploadOutcome, UploadRequest, UploadService};
