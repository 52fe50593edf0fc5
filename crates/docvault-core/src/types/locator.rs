//! Tagged blob locators.
//!
//! A [`Locator`] records which backend holds a blob alongside the
//! backend-specific address, so read and delete paths dispatch on the
//! variant instead of inspecting the address string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The object store backend that holds a blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "storage_backend", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local filesystem under the configured root.
    Local,
    /// Cloud blob service, addressed by public URL.
    Cloud,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Cloud => write!(f, "cloud"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "cloud" => Ok(Self::Cloud),
            other => Err(AppError::validation(format!(
                "Unknown storage backend '{other}'"
            ))),
        }
    }
}

/// Where a blob lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "lowercase")]
pub enum Locator {
    /// A key relative to the local storage root.
    Local {
        /// Relative storage key.
        key: String,
    },
    /// A public URL issued by the cloud blob service.
    Cloud {
        /// Absolute URL.
        url: String,
    },
}

impl Locator {
    /// Build a local locator.
    pub fn local(key: impl Into<String>) -> Self {
        Self::Local { key: key.into() }
    }

    /// Build a cloud locator.
    pub fn cloud(url: impl Into<String>) -> Self {
        Self::Cloud { url: url.into() }
    }

    /// Rebuild a locator from its persisted `(backend, address)` pair.
    pub fn from_parts(backend: StorageBackend, address: impl Into<String>) -> Self {
        match backend {
            StorageBackend::Local => Self::local(address),
            StorageBackend::Cloud => Self::cloud(address),
        }
    }

    /// The backend discriminant.
    pub fn backend(&self) -> StorageBackend {
        match self {
            Self::Local { .. } => StorageBackend::Local,
            Self::Cloud { .. } => StorageBackend::Cloud,
        }
    }

    /// The backend-specific address (storage key or URL).
    pub fn address(&self) -> &str {
        match self {
            Self::Local { key } => key,
            Self::Cloud { url } => url,
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.backend(), self.address())
    }
}
