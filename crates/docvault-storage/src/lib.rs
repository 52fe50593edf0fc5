//! # docvault-storage
//!
//! Object store backends for DocVault. New uploads go to the backend
//! selected by configuration. Reads and deletes are routed by each
//! locator's own backend tag.

pub mod keys;
pub mod manager;
pub mod providers;

pub use keys::generate_storage_key;
pub use manager::StorageManager;
