//! # docvault-database
//!
//! Record store for DocVault: the owner-scoped store traits consumed by
//! the service layer, their PostgreSQL implementations, and (behind the
//! `memory` feature) an in-memory implementation with the same
//! uniqueness and cascade semantics.

pub mod connection;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{FileScope, FileStore, FolderStore, UserStore};
