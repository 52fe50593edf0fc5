//! Object store configuration.

use serde::{Deserialize, Serialize};

/// Which object store backend receives new uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderSelection {
    /// Cloud when a cloud token is configured, otherwise local.
    #[default]
    Auto,
    /// Always the local filesystem.
    Local,
    /// Always the cloud blob service.
    Cloud,
}

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend selection for new writes.
    #[serde(default)]
    pub provider: ProviderSelection,
    /// Refuse to start without a cloud backend (production deployments).
    #[serde(default)]
    pub require_cloud: bool,
    /// Maximum upload size in bytes (default 10 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// MIME types accepted by the upload path.
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// Cloud blob storage configuration.
    #[serde(default)]
    pub cloud: CloudStorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: ProviderSelection::default(),
            require_cloud: false,
            max_upload_size_bytes: default_max_upload(),
            allowed_mime_types: default_allowed_mime_types(),
            local: LocalStorageConfig::default(),
            cloud: CloudStorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for local file storage.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

/// HTTP blob service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudStorageConfig {
    /// Base URL of the blob API.
    #[serde(default = "default_cloud_api_url")]
    pub api_url: String,
    /// Read-write token. Empty means the cloud backend is not configured.
    #[serde(default)]
    pub token: String,
    /// Value sent in the `x-api-version` header.
    #[serde(default = "default_cloud_api_version")]
    pub api_version: String,
    /// Answer content reads for cloud files with a redirect to the public URL.
    #[serde(default = "default_true")]
    pub redirect_reads: bool,
    /// Request timeout in seconds.
    #[serde(default = "default_cloud_timeout")]
    pub timeout_seconds: u64,
}

impl CloudStorageConfig {
    /// Whether credentials for the cloud backend are present.
    pub fn is_configured(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

impl Default for CloudStorageConfig {
    fn default() -> Self {
        Self {
            api_url: default_cloud_api_url(),
            token: String::new(),
            api_version: default_cloud_api_version(),
            redirect_reads: true,
            timeout_seconds: default_cloud_timeout(),
        }
    }
}

fn default_max_upload() -> u64 {
    10_485_760 // 10 MiB
}

fn default_allowed_mime_types() -> Vec<String> {
    vec!["application/pdf".to_string()]
}

fn default_local_root() -> String {
    "./data/uploads".to_string()
}

fn default_cloud_api_url() -> String {
    "https://blob.vercel-storage.com".to_string()
}

fn default_cloud_api_version() -> String {
    "7".to_string()
}

fn default_cloud_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}
