//! Integration tests for folder operations and identity handling.

mod helpers;

use chrono::Utc;
use http::StatusCode;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use uuid::Uuid;

use docvault_entity::folder::Folder;

use helpers::TestApp;

fn names(list: &serde_json::Value) -> Vec<String> {
    list.as_array()
        .expect("array")
        .iter()
        .map(|v| v["name"].as_str().expect("name").to_string())
        .collect()
}

#[tokio::test]
async fn test_requests_without_token_are_rejected() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/folders", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "AUTHENTICATION");
    assert_eq!(app.store.folder_count().await, 0);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = TestApp::new();
    let claims = json!({
        "email": "mallory@example.com",
        "exp": Utc::now().timestamp() + 3600,
    });
    let forged = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"not-the-secret"),
    )
    .unwrap();

    let response = app.request("GET", "/api/me", None, Some(&forged)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new();
    let expired = docvault_auth::IdentityTokenIssuer::new(&app.config.auth)
        .issue_for("late@example.com", None, None, chrono::Duration::hours(-1))
        .unwrap();

    let response = app.request("GET", "/api/me", None, Some(&expired)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Token has expired");
}

#[tokio::test]
async fn test_me_materializes_user_once() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");

    let first = app.request("GET", "/api/me", None, Some(&token)).await;
    let second = app.request("GET", "/api/me", None, Some(&token)).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["email"], "alice@example.com");
    assert_eq!(first.body["data"]["id"], second.body["data"]["id"]);
}

#[tokio::test]
async fn test_create_folder_composes_paths() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");

    let docs = app.create_folder(&token, "Docs", None).await;
    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "2024", "parentId": docs })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["path"], "/Docs/");
    assert_eq!(response.body["data"]["parentId"], docs.as_str());

    let roots = app.request("GET", "/api/folders", None, Some(&token)).await;
    assert_eq!(roots.body["data"][0]["path"], "/");
    assert_eq!(roots.body["data"][0]["childCount"], 1);
}

#[tokio::test]
async fn test_create_folder_validates_name() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");

    for (name, message) in [
        ("", "Folder name is required"),
        ("   ", "Folder name is required"),
        ("a/b", "Folder name may not contain '/' or NUL characters"),
    ] {
        let response = app
            .request("POST", "/api/folders", Some(json!({ "name": name })), Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{name:?}");
        assert_eq!(response.body["message"], message);
    }

    let long = "x".repeat(256);
    let response = app
        .request("POST", "/api/folders", Some(json!({ "name": long })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Folder name too long");
}

#[tokio::test]
async fn test_create_duplicate_sibling_conflicts() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    app.create_folder(&token, "Docs", None).await;

    let response = app
        .request("POST", "/api/folders", Some(json!({ "name": " Docs " })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(app.store.folder_count().await, 1);
}

#[tokio::test]
async fn test_create_under_unknown_parent_is_not_found() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "name": "Orphan", "parentId": Uuid::new_v4() })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Parent folder not found");
}

#[tokio::test]
async fn test_rename_to_sibling_name_conflicts() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let a = app.create_folder(&token, "A", None).await;
    app.create_folder(&token, "B", None).await;

    let clash = app
        .request("PUT", &format!("/api/folders/{a}"), Some(json!({ "name": "B" })), Some(&token))
        .await;
    assert_eq!(clash.status, StatusCode::CONFLICT);

    let ok = app
        .request("PUT", &format!("/api/folders/{a}"), Some(json!({ "name": "C" })), Some(&token))
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["data"]["name"], "C");
}

#[tokio::test]
async fn test_rename_to_own_name_is_noop() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let a = app.create_folder(&token, "A", None).await;

    let response = app
        .request("PUT", &format!("/api/folders/{a}"), Some(json!({ "name": "A" })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "A");
    assert_eq!(response.body["data"]["id"], a.as_str());
}

#[tokio::test]
async fn test_rename_rewrites_descendant_paths() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let docs = app.create_folder(&token, "Docs", None).await;
    let year = app.create_folder(&token, "2024", Some(&docs)).await;
    app.create_folder(&token, "Q1", Some(&year)).await;

    app.request("PUT", &format!("/api/folders/{docs}"), Some(json!({ "name": "Papers" })), Some(&token))
        .await;

    let children = app
        .request("GET", &format!("/api/folders?parentId={year}"), None, Some(&token))
        .await;
    assert_eq!(children.body["data"][0]["path"], "/Papers/2024/");

    let trail = app
        .request("GET", &format!("/api/folders/breadcrumbs?folderId={year}"), None, Some(&token))
        .await;
    assert_eq!(trail.body["data"][1]["path"], "/Papers/");
}

#[tokio::test]
async fn test_breadcrumbs_trail_and_edges() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let docs = app.create_folder(&token, "Docs", None).await;
    let year = app.create_folder(&token, "2024", Some(&docs)).await;

    let trail = app
        .request("GET", &format!("/api/folders/breadcrumbs?folderId={year}"), None, Some(&token))
        .await;
    assert_eq!(trail.status, StatusCode::OK);
    assert_eq!(names(&trail.body["data"]), ["Docs", "2024"]);
    assert_eq!(trail.body["data"][0]["path"], "/");

    let root = app
        .request("GET", "/api/folders/breadcrumbs?folderId=", None, Some(&token))
        .await;
    assert_eq!(root.body["data"], json!([]));

    let missing = app
        .request(
            "GET",
            &format!("/api/folders/breadcrumbs?folderId={}", Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_breadcrumbs_stop_at_broken_link() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let me = app.request("GET", "/api/me", None, Some(&token)).await;
    let owner_id: Uuid = me.body["data"]["id"].as_str().unwrap().parse().unwrap();

    let now = Utc::now();
    let stray = Folder {
        id: Uuid::new_v4(),
        name: "Stray".into(),
        path: "/Gone/".into(),
        parent_id: Some(Uuid::new_v4()),
        owner_id,
        created_at: now,
        updated_at: now,
    };
    let stray_id = stray.id;
    app.store.insert_folder_unchecked(stray).await;
    let leaf = app.create_folder(&token, "Leaf", Some(&stray_id.to_string())).await;

    let trail = app
        .request("GET", &format!("/api/folders/breadcrumbs?folderId={leaf}"), None, Some(&token))
        .await;

    assert_eq!(trail.status, StatusCode::OK);
    assert_eq!(names(&trail.body["data"]), ["Stray", "Leaf"]);
}

#[tokio::test]
async fn test_contents_lists_folders_before_files() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let docs = app.create_folder(&token, "Docs", None).await;
    app.create_folder(&token, "Zeta", Some(&docs)).await;
    app.upload_pdf(&token, "alpha.pdf", Some(&docs)).await;

    let response = app
        .request("GET", &format!("/api/folders/contents?folderId={docs}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["type"], "folder");
    assert_eq!(items[0]["name"], "Zeta");
    assert_eq!(items[1]["type"], "file");
    assert_eq!(items[1]["name"], "alpha.pdf");
}

#[tokio::test]
async fn test_delete_folder_cascades() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let a = app.create_folder(&token, "A", None).await;
    let b = app.create_folder(&token, "B", Some(&a)).await;
    app.upload_pdf(&token, "a.pdf", Some(&a)).await;
    app.upload_pdf(&token, "b.pdf", Some(&b)).await;
    let keep = app.create_folder(&token, "Keep", None).await;

    let response = app
        .request("DELETE", &format!("/api/folders/{a}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["folders"], 2);
    assert_eq!(response.body["data"]["files"], 2);
    assert_eq!(app.store.folder_count().await, 1);
    assert_eq!(app.store.file_count().await, 0);
    assert_eq!(app.blobs.delete_attempts(), 2);
    assert!(app.blobs.is_empty().await);

    let roots = app.request("GET", "/api/folders", None, Some(&token)).await;
    assert_eq!(roots.body["data"][0]["id"], keep.as_str());
}

#[tokio::test]
async fn test_delete_folder_survives_blob_failures() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");
    let a = app.create_folder(&token, "A", None).await;
    app.upload_pdf(&token, "a.pdf", Some(&a)).await;
    app.blobs.fail_deletes(true);

    let response = app
        .request("DELETE", &format!("/api/folders/{a}"), None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.store.file_count().await, 0);
    assert_eq!(app.store.folder_count().await, 0);
    assert_eq!(app.blobs.len().await, 1);
}

#[tokio::test]
async fn test_folders_are_owner_scoped() {
    let app = TestApp::new();
    let alice = app.token("alice@example.com");
    let bob = app.token("bob@example.com");
    let docs = app.create_folder(&alice, "Docs", None).await;

    let listing = app.request("GET", "/api/folders", None, Some(&bob)).await;
    assert_eq!(listing.body["data"], json!([]));

    let nested = app
        .request("GET", &format!("/api/folders?parentId={docs}"), None, Some(&bob))
        .await;
    assert_eq!(nested.status, StatusCode::NOT_FOUND);

    let rename = app
        .request("PUT", &format!("/api/folders/{docs}"), Some(json!({ "name": "Mine" })), Some(&bob))
        .await;
    assert_eq!(rename.status, StatusCode::NOT_FOUND);

    let delete = app
        .request("DELETE", &format!("/api/folders/{docs}"), None, Some(&bob))
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);
    assert_eq!(app.store.folder_count().await, 1);

    // Same name is free in another owner's namespace.
    app.create_folder(&bob, "Docs", None).await;
}

#[tokio::test]
async fn test_malformed_folder_id_is_bad_request() {
    let app = TestApp::new();
    let token = app.token("alice@example.com");

    let response = app
        .request("GET", "/api/folders?parentId=not-a-uuid", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
