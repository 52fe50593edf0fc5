//! # docvault-core
//!
//! Core crate for DocVault. Contains the configuration schema, the
//! object-store trait, the tagged storage locator, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other DocVault crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
