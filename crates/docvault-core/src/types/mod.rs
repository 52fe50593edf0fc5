//! Core type definitions used across the DocVault workspace.

pub mod locator;

pub use locator::{Locator, StorageBackend};
