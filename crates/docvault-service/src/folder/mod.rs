//! Folder tree: path resolution, breadcrumb trails and tree operations.

pub mod breadcrumbs;
pub mod path;
pub mod service;

pub use breadcrumbs::BreadcrumbService;
pub use path::resolve_path;
pub use service::{FolderDeletion, FolderService};
