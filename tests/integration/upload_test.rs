//! Integration tests for the multipart upload protocol.

mod helpers;

use http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use helpers::{TestApp, UploadForm};

async fn root_names(app: &TestApp, token: &str) -> Vec<String> {
    let response = app.request("GET", "/api/files", None, Some(token)).await;
    response.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_upload_requires_identity() {
    let app = TestApp::new();

    let response = app.upload("garbage", UploadForm::pdf("a.pdf")).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(app.blobs.is_empty().await);
}

#[tokio::test]
async fn test_upload_into_folder() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let docs = app.create_folder(&token, "Docs", None).await;

    let response = app
        .upload(
            &token,
            UploadForm {
                folder_id: Some(&docs),
                ..UploadForm::pdf("report.pdf")
            },
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let file = &response.body["data"];
    assert_eq!(file["name"], "report.pdf");
    assert_eq!(file["originalName"], "report.pdf");
    assert_eq!(file["mimeType"], "application/pdf");
    assert_eq!(file["folderId"], docs.as_str());
    assert_eq!(app.blobs.len().await, 1);
}

#[tokio::test]
async fn test_conflict_protocol_with_keep_both() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    app.upload_pdf(&token, "report.pdf", None).await;

    let conflict = app.upload(&token, UploadForm::pdf("report.pdf")).await;
    assert_eq!(conflict.status, StatusCode::CONFLICT);
    assert_eq!(
        conflict.body,
        json!({ "success": false, "conflict": true, "fileName": "report.pdf" })
    );
    assert_eq!(app.store.file_count().await, 1);
    assert_eq!(app.blobs.len().await, 1);

    for expected in ["report (1).pdf", "report (2).pdf"] {
        let response = app
            .upload(
                &token,
                UploadForm {
                    conflict_resolution: Some("keep-both"),
                    ..UploadForm::pdf("report.pdf")
                },
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["data"]["name"], expected);
        assert_eq!(response.body["data"]["originalName"], "report.pdf");
    }

    assert_eq!(
        root_names(&app, &token).await,
        ["report (1).pdf", "report (2).pdf", "report.pdf"]
    );
}

#[tokio::test]
async fn test_overwrite_replaces_existing_file() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let old = app.upload_pdf(&token, "x.pdf", None).await;

    let response = app
        .upload(
            &token,
            UploadForm {
                conflict_resolution: Some("overwrite"),
                data: b"%PDF-1.7 replacement".to_vec(),
                ..UploadForm::pdf("x.pdf")
            },
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_ne!(response.body["data"]["id"], old["id"]);
    assert_eq!(root_names(&app, &token).await, ["x.pdf"]);
    assert_eq!(app.store.file_count().await, 1);
    assert_eq!(app.blobs.delete_attempts(), 1);
    assert_eq!(app.blobs.len().await, 1);
}

#[tokio::test]
async fn test_cancel_leaves_everything_unchanged() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    app.upload_pdf(&token, "x.pdf", None).await;

    let response = app
        .upload(
            &token,
            UploadForm {
                conflict_resolution: Some("cancel"),
                ..UploadForm::pdf("x.pdf")
            },
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "success": true, "cancelled": true }));
    assert_eq!(app.store.file_count().await, 1);
    assert_eq!(app.blobs.len().await, 1);
}

#[tokio::test]
async fn test_strategy_is_ignored_without_collision() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");

    let response = app
        .upload(
            &token,
            UploadForm {
                conflict_resolution: Some("keep-both"),
                ..UploadForm::pdf("fresh.pdf")
            },
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["name"], "fresh.pdf");
}

#[tokio::test]
async fn test_rejects_disallowed_mime_type() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");

    let response = app
        .upload(
            &token,
            UploadForm {
                mime_type: "image/png",
                ..UploadForm::pdf("photo.png")
            },
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(
        response.body["message"]
            .as_str()
            .unwrap()
            .starts_with("File type 'image/png' is not allowed")
    );
    assert!(app.blobs.is_empty().await);
}

#[tokio::test]
async fn test_rejects_oversized_file() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let cap = app.config.storage.max_upload_size_bytes as usize;

    let response = app
        .upload(
            &token,
            UploadForm {
                data: vec![b'x'; cap + 1],
                ..UploadForm::pdf("big.pdf")
            },
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "File size must be less than 1MB");
    assert!(app.blobs.is_empty().await);
}

#[tokio::test]
async fn test_missing_file_field() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");

    let response = app
        .upload(
            &token,
            UploadForm {
                file_name: None,
                ..UploadForm::pdf("unused.pdf")
            },
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "No file provided");
}

#[tokio::test]
async fn test_unknown_target_folder() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let folder = Uuid::new_v4().to_string();

    let response = app
        .upload(
            &token,
            UploadForm {
                folder_id: Some(&folder),
                ..UploadForm::pdf("a.pdf")
            },
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Target folder not found");
    assert!(app.blobs.is_empty().await);
}

#[tokio::test]
async fn test_unknown_conflict_resolution() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");

    let response = app
        .upload(
            &token,
            UploadForm {
                conflict_resolution: Some("merge"),
                ..UploadForm::pdf("a.pdf")
            },
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blob_write_failure_aborts_upload() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    app.blobs.fail_puts(true);

    let response = app.upload(&token, UploadForm::pdf("a.pdf")).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "STORAGE");
    assert_eq!(app.store.file_count().await, 0);
}

#[tokio::test]
async fn test_empty_folder_id_means_root() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");

    let response = app
        .upload(
            &token,
            UploadForm {
                folder_id: Some(""),
                ..UploadForm::pdf("a.pdf")
            },
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert!(response.body["data"]["folderId"].is_null());
}
