//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::response::Response;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use docvault_api::{AppState, build_router};
use docvault_auth::IdentityTokenIssuer;
use docvault_core::config::AppConfig;
use docvault_core::types::StorageBackend;
use docvault_database::memory::MemoryStore;
use docvault_storage::StorageManager;
use docvault_storage::providers::MemoryStorageProvider;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const PDF_BYTES: &[u8] = b"%PDF-1.7 integration";

const BOUNDARY: &str = "docvault-test-boundary";

/// Test configuration: small upload cap and a known signing secret.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = TEST_SECRET.to_string();
    config.storage.max_upload_size_bytes = 1024 * 1024;
    config
}

/// Test application context over in-memory stores
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Record store shared with the router
    pub store: Arc<MemoryStore>,
    /// Object store for the active backend
    pub blobs: Arc<MemoryStorageProvider>,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application writing to a local-style backend
    pub fn new() -> Self {
        Self::build(test_config(), StorageBackend::Local)
    }

    /// Create a test application writing to the given backend
    pub fn with_backend(backend: StorageBackend) -> Self {
        Self::build(test_config(), backend)
    }

    pub fn build(config: AppConfig, backend: StorageBackend) -> Self {
        let store = Arc::new(MemoryStore::new());
        let blobs = Arc::new(MemoryStorageProvider::new(backend));
        let storage = Arc::new(StorageManager::new(blobs.clone()));

        let state = AppState::new(
            config.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            storage,
        );

        Self {
            router: build_router(state),
            store,
            blobs,
            config,
        }
    }

    /// Mint a valid identity token for `email`
    pub fn token(&self, email: &str) -> String {
        IdentityTokenIssuer::new(&self.config.auth)
            .issue_for(email, Some("Test User"), None, chrono::Duration::hours(1))
            .expect("Failed to sign token")
    }

    /// Send a request and return the raw response
    pub async fn send(&self, req: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request")
    }

    /// Make a JSON HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        TestResponse::from_response(self.send(req).await).await
    }

    /// POST a multipart upload
    pub async fn upload(&self, token: &str, form: UploadForm<'_>) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(form.encode()))
            .expect("Failed to build upload request");

        TestResponse::from_response(self.send(req).await).await
    }

    /// Upload a PDF and return its JSON record
    pub async fn upload_pdf(&self, token: &str, name: &str, folder_id: Option<&str>) -> Value {
        let response = self
            .upload(
                token,
                UploadForm {
                    folder_id,
                    ..UploadForm::pdf(name)
                },
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"].clone()
    }

    /// Create a folder and return its ID
    pub async fn create_folder(&self, token: &str, name: &str, parent_id: Option<&str>) -> String {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": name, "parentId": parent_id })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["data"]["id"]
            .as_str()
            .expect("folder id")
            .to_string()
    }
}

/// Fields of a multipart upload
#[derive(Debug, Clone)]
pub struct UploadForm<'a> {
    pub file_name: Option<&'a str>,
    pub mime_type: &'a str,
    pub data: Vec<u8>,
    pub folder_id: Option<&'a str>,
    pub conflict_resolution: Option<&'a str>,
}

impl<'a> UploadForm<'a> {
    pub fn pdf(name: &'a str) -> Self {
        Self {
            file_name: Some(name),
            mime_type: "application/pdf",
            data: PDF_BYTES.to_vec(),
            folder_id: None,
            conflict_resolution: None,
        }
    }

    fn encode(&self) -> Vec<u8> {
        fn text_field(body: &mut Vec<u8>, name: &str, value: &str) {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }

        let mut body = Vec::new();

        if let Some(folder_id) = self.folder_id {
            text_field(&mut body, "folderId", folder_id);
        }
        if let Some(strategy) = self.conflict_resolution {
            text_field(&mut body, "conflictResolution", strategy);
        }

        if let Some(file_name) = self.file_name {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {}\r\n\r\n",
                    self.mime_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(&self.data);
            body.extend_from_slice(b"\r\n");
        }

        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    pub async fn from_response(response: Response) -> Self {
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 4 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);
        Self { status, body }
    }
}
