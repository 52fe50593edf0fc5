//! Cloud blob storage provider.
//!
//! Talks to a Vercel-Blob compatible HTTP API: uploads are `PUT` to
//! `{api_url}/{key}` with a bearer token and answer with the public URL
//! of the blob. Reads go straight to that URL.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use docvault_core::config::CloudStorageConfig;
use docvault_core::error::{AppError, ErrorKind};
use docvault_core::result::AppResult;
use docvault_core::traits::StorageProvider;
use docvault_core::types::{Locator, StorageBackend};

#[derive(Debug, Deserialize)]
struct PutBlobResponse {
    url: String,
}

#[derive(Debug, Serialize)]
struct DeleteBlobsRequest<'a> {
    urls: [&'a str; 1],
}

fn delete_request(url: &str) -> DeleteBlobsRequest<'_> {
    DeleteBlobsRequest { urls: [url] }
}

/// Stores blobs in the cloud blob service.
#[derive(Debug, Clone)]
pub struct BlobStorageProvider {
    client: Client,
    api_url: String,
    token: String,
    api_version: String,
}

impl BlobStorageProvider {
    /// Build a provider from configuration.
    pub fn new(config: &CloudStorageConfig) -> AppResult<Self> {
        if !config.is_configured() {
            return Err(AppError::configuration(
                "Cloud storage token is not configured",
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build cloud storage HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            api_version: config.api_version.clone(),
        })
    }

    fn blob_url<'a>(&self, locator: &'a Locator) -> AppResult<&'a str> {
        match locator {
            Locator::Cloud { url } => Ok(url),
            other => Err(AppError::storage(format!(
                "Cloud storage cannot serve {} locator",
                other.backend()
            ))),
        }
    }
}

fn request_failed(action: &str, err: reqwest::Error) -> AppError {
    AppError::with_source(
        ErrorKind::Storage,
        format!("Cloud storage {action} failed: {err}"),
        err,
    )
}

fn unexpected_status(action: &str, status: StatusCode) -> AppError {
    AppError::storage(format!(
        "Cloud storage {action} returned HTTP {}",
        status.as_u16()
    ))
}

#[async_trait]
impl StorageProvider for BlobStorageProvider {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Cloud
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.token.is_empty())
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<Locator> {
        let bytes = data.len();
        let response = self
            .client
            .put(format!("{}/{}", self.api_url, key.trim_start_matches('/')))
            .bearer_auth(&self.token)
            .header("x-api-version", &self.api_version)
            .header("x-content-type", content_type)
            .header("x-add-random-suffix", "0")
            .body(data)
            .send()
            .await
            .map_err(|e| request_failed("upload", e))?;

        if !response.status().is_success() {
            return Err(unexpected_status("upload", response.status()));
        }

        let body: PutBlobResponse = response
            .json()
            .await
            .map_err(|e| request_failed("upload", e))?;

        debug!(key, bytes, url = %body.url, "Wrote blob to cloud storage");
        Ok(Locator::cloud(body.url))
    }

    async fn get(&self, locator: &Locator) -> AppResult<Bytes> {
        let url = self.blob_url(locator)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_failed("read", e))?;

        match response.status() {
            status if status.is_success() => response
                .bytes()
                .await
                .map_err(|e| request_failed("read", e)),
            StatusCode::NOT_FOUND => Err(AppError::not_found(format!("Blob not found: {url}"))),
            status => Err(unexpected_status("read", status)),
        }
    }

    async fn delete(&self, locator: &Locator) -> AppResult<()> {
        let url = self.blob_url(locator)?;
        let response = self
            .client
            .post(format!("{}/delete", self.api_url))
            .bearer_auth(&self.token)
            .header("x-api-version", &self.api_version)
            .json(&delete_request(url))
            .send()
            .await
            .map_err(|e| request_failed("delete", e))?;

        if !response.status().is_success() {
            return Err(unexpected_status("delete", response.status()));
        }

        debug!(url, "Deleted blob from cloud storage");
        Ok(())
    }

    async fn exists(&self, locator: &Locator) -> AppResult<bool> {
        let url = self.blob_url(locator)?;
        let response = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| request_failed("stat", e))?;

        match response.status() {
            status if status.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(unexpected_status("stat", status)),
        }
    }
}
