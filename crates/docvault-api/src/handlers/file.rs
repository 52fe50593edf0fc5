//! File listing, rename, delete and content handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_service::FileContent;

use crate::dto::request::{FileListQuery, RenameFileRequest};
use crate::dto::response::{ApiResponse, DeletedResponse, FileResponse};
use crate::error::ApiError;
use crate::extractors::{ApiQuery, AuthUser, ValidJson};
use crate::state::AppState;

/// GET /api/files?folderId=...&allFiles=...
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<FileListQuery>,
) -> Result<Json<ApiResponse<Vec<FileResponse>>>, ApiError> {
    let files = state
        .file_service
        .list_files(&auth, query.folder_id, query.all_files)
        .await?;
    Ok(Json(ApiResponse::ok(
        files.into_iter().map(FileResponse::from).collect(),
    )))
}

/// PUT /api/files/{id}
pub async fn rename_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(req): ValidJson<RenameFileRequest>,
) -> Result<Json<ApiResponse<FileResponse>>, ApiError> {
    let file = state.file_service.rename_file(&auth, id, &req.name).await?;
    Ok(Json(ApiResponse::ok(file.into())))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    state.file_service.delete_file(&auth, id).await?;
    Ok(Json(ApiResponse::ok(DeletedResponse { id })))
}

/// `inline; filename="..."` with characters that would break the quoted
/// string replaced.
fn inline_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("inline; filename=\"{safe}\"")
}

/// GET /api/files/{id}/content
pub async fn content(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    match state.download_service.content(&auth, id).await? {
        FileContent::Redirect { url } => Ok(Redirect::temporary(&url).into_response()),
        FileContent::Inline {
            bytes,
            mime_type,
            file_name,
        } => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime_type)
            .header(header::CONTENT_DISPOSITION, inline_disposition(&file_name))
            .header(header::CACHE_CONTROL, "private, max-age=3600")
            .header(header::CONTENT_LENGTH, bytes.len())
            .body(Body::from(bytes))
            .map_err(|e| ApiError::from(AppError::internal(format!("Response build failed: {e}")))),
    }
}
