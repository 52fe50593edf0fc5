//! Route definitions for the DocVault HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Allowance for multipart framing on top of the file size cap, so an
/// oversized file still reaches the size check.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.storage.max_upload_size_bytes as usize + MULTIPART_OVERHEAD;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .merge(folder_routes())
        .merge(file_routes())
        .merge(upload_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

fn user_routes() -> Router<AppState> {
    Router::new().route("/me", get(handlers::user::me))
}

/// Folder listing, CRUD, breadcrumbs and contents
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
        .route("/folders/breadcrumbs", get(handlers::folder::breadcrumbs))
        .route("/folders/contents", get(handlers::folder::contents))
        .route(
            "/folders/{id}",
            put(handlers::folder::rename_folder).delete(handlers::folder::delete_folder),
        )
}

/// File listing, rename, delete and content
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", get(handlers::file::list_files))
        .route(
            "/files/{id}",
            put(handlers::file::rename_file).delete(handlers::file::delete_file),
        )
        .route("/files/{id}/content", get(handlers::file::content))
}

fn upload_routes() -> Router<AppState> {
    Router::new().route("/upload", post(handlers::upload::upload))
}
