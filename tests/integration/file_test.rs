//! Integration tests for file operations.

mod helpers;

use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::json;
use uuid::Uuid;

use docvault_core::traits::StorageProvider;
use docvault_core::types::StorageBackend;
use docvault_database::FileStore;

use helpers::{PDF_BYTES, TestApp};

fn content_request(id: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/api/files/{id}/content"))
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_list_files_unauthenticated() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/files", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_files_by_folder_with_size_display() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let docs = app.create_folder(&token, "Docs", None).await;
    app.upload_pdf(&token, "b.pdf", None).await;
    app.upload_pdf(&token, "a.pdf", None).await;
    app.upload_pdf(&token, "inner.pdf", Some(&docs)).await;

    let root = app.request("GET", "/api/files", None, Some(&token)).await;
    assert_eq!(root.status, StatusCode::OK);
    let files = root.body["data"].as_array().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0]["name"], "a.pdf");
    assert_eq!(files[1]["name"], "b.pdf");
    assert_eq!(files[0]["sizeBytes"], PDF_BYTES.len());
    assert_eq!(files[0]["sizeDisplay"], format!("{} Bytes", PDF_BYTES.len()));
    assert!(files[0].get("storageLocator").is_none());

    let scoped = app
        .request("GET", &format!("/api/files?folderId={docs}"), None, Some(&token))
        .await;
    assert_eq!(scoped.body["data"][0]["name"], "inner.pdf");

    let all = app
        .request("GET", &format!("/api/files?folderId={docs}&allFiles=true"), None, Some(&token))
        .await;
    assert_eq!(all.body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_files_in_unknown_folder_is_not_found() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");

    let response = app
        .request("GET", &format!("/api/files?folderId={}", Uuid::new_v4()), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Folder not found");
}

#[tokio::test]
async fn test_rename_file() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let a = app.upload_pdf(&token, "a.pdf", None).await;
    app.upload_pdf(&token, "b.pdf", None).await;
    let id = a["id"].as_str().unwrap();

    let clash = app
        .request("PUT", &format!("/api/files/{id}"), Some(json!({ "name": "b.pdf" })), Some(&token))
        .await;
    assert_eq!(clash.status, StatusCode::CONFLICT);
    assert_eq!(clash.body["message"], "A file named 'b.pdf' already exists in this location");

    let same = app
        .request("PUT", &format!("/api/files/{id}"), Some(json!({ "name": "a.pdf" })), Some(&token))
        .await;
    assert_eq!(same.status, StatusCode::OK);
    assert_eq!(same.body["data"]["updatedAt"], a["updatedAt"]);

    let renamed = app
        .request("PUT", &format!("/api/files/{id}"), Some(json!({ "name": "c.pdf" })), Some(&token))
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body["data"]["name"], "c.pdf");
    assert_eq!(renamed.body["data"]["originalName"], "a.pdf");
}

#[tokio::test]
async fn test_rename_file_requires_name() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let a = app.upload_pdf(&token, "a.pdf", None).await;

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{}", a["id"].as_str().unwrap()),
            Some(json!({ "name": "" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "File name is required");
}

#[tokio::test]
async fn test_delete_file_removes_record_and_blob() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let file = app.upload_pdf(&token, "a.pdf", None).await;
    let path = format!("/api/files/{}", file["id"].as_str().unwrap());

    let response = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.store.file_count().await, 0);
    assert!(app.blobs.is_empty().await);

    let again = app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_file_tolerates_blob_failure() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let file = app.upload_pdf(&token, "a.pdf", None).await;
    app.blobs.fail_deletes(true);

    let response = app
        .request("DELETE", &format!("/api/files/{}", file["id"].as_str().unwrap()), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.store.file_count().await, 0);
    assert_eq!(app.blobs.delete_attempts(), 1);
}

#[tokio::test]
async fn test_other_owner_cannot_touch_file() {
    let app = TestApp::new();
    let alice = app.token("alice@example.com");
    let bob = app.token("bob@example.com");
    let file = app.upload_pdf(&alice, "a.pdf", None).await;
    let id = file["id"].as_str().unwrap();

    let listing = app.request("GET", "/api/files?allFiles=true", None, Some(&bob)).await;
    assert_eq!(listing.body["data"], json!([]));

    let content = app.send(content_request(id, &bob)).await;
    assert_eq!(content.status(), StatusCode::NOT_FOUND);

    let delete = app
        .request("DELETE", &format!("/api/files/{id}"), None, Some(&bob))
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.file_count().await, 1);
}

#[tokio::test]
async fn test_content_is_served_inline() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let file = app.upload_pdf(&token, "report.pdf", None).await;

    let response = app
        .send(content_request(file["id"].as_str().unwrap(), &token))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::CONTENT_TYPE], "application/pdf");
    assert_eq!(headers[header::CONTENT_DISPOSITION], "inline; filename=\"report.pdf\"");
    assert_eq!(headers[header::CACHE_CONTROL], "private, max-age=3600");

    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&body[..], PDF_BYTES);
}

#[tokio::test]
async fn test_content_uses_original_name_after_rename() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let file = app.upload_pdf(&token, "report.pdf", None).await;
    let id = file["id"].as_str().unwrap();
    app.request("PUT", &format!("/api/files/{id}"), Some(json!({ "name": "final.pdf" })), Some(&token))
        .await;

    let response = app.send(content_request(id, &token)).await;

    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "inline; filename=\"report.pdf\""
    );
}

#[tokio::test]
async fn test_cloud_content_redirects() {
    let app = TestApp::with_backend(StorageBackend::Cloud);
    let token = app.token("alice@example.com");
    let file = app.upload_pdf(&token, "report.pdf", None).await;
    assert_eq!(file["storageBackend"], "cloud");

    let response = app
        .send(content_request(file["id"].as_str().unwrap(), &token))
        .await;

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = response.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("https://memory.blob.test/"));
    assert!(location.ends_with(".pdf"));
}

#[tokio::test]
async fn test_missing_blob_is_not_found() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let file = app.upload_pdf(&token, "report.pdf", None).await;
    let id = file["id"].as_str().unwrap();
    let owner_id: Uuid = file["ownerId"].as_str().unwrap().parse().unwrap();

    let record = FileStore::find_by_id(app.store.as_ref(), owner_id, id.parse().unwrap())
        .await
        .unwrap()
        .unwrap();
    app.blobs.delete(&record.locator()).await.unwrap();

    let response = app.send(content_request(id, &token)).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["message"], "File content not found");
}
