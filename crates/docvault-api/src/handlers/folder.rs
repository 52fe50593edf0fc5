//! Folder tree handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use docvault_entity::Item;
use docvault_entity::folder::{Breadcrumb, Folder, FolderSummary};

use crate::dto::request::{
    CreateFolderRequest, FolderListQuery, FolderScopeQuery, RenameFolderRequest,
};
use crate::dto::response::{ApiResponse, FolderDeletedResponse};
use crate::error::ApiError;
use crate::extractors::{ApiQuery, AuthUser, ValidJson};
use crate::state::AppState;

/// GET /api/folders?parentId=...
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<FolderListQuery>,
) -> Result<Json<ApiResponse<Vec<FolderSummary>>>, ApiError> {
    let folders = state
        .folder_service
        .list_folders(&auth, query.parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(folders)))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Folder>>), ApiError> {
    let folder = state
        .folder_service
        .create_folder(&auth, &req.name, req.parent_id)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// PUT /api/folders/{id}
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidJson(req): ValidJson<RenameFolderRequest>,
) -> Result<Json<ApiResponse<Folder>>, ApiError> {
    let folder = state
        .folder_service
        .rename_folder(&auth, id, &req.name)
        .await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<FolderDeletedResponse>>, ApiError> {
    let deletion = state.folder_service.delete_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(FolderDeletedResponse {
        id,
        folders: deletion.folders,
        files: deletion.files,
    })))
}

/// GET /api/folders/breadcrumbs?folderId=...
pub async fn breadcrumbs(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<FolderScopeQuery>,
) -> Result<Json<ApiResponse<Vec<Breadcrumb>>>, ApiError> {
    let trail = state
        .breadcrumb_service
        .trail(&auth, query.folder_id)
        .await?;
    Ok(Json(ApiResponse::ok(trail)))
}

/// GET /api/folders/contents?folderId=...
pub async fn contents(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiQuery(query): ApiQuery<FolderScopeQuery>,
) -> Result<Json<ApiResponse<Vec<Item>>>, ApiError> {
    let items = state
        .folder_service
        .list_contents(&auth, query.folder_id)
        .await?;
    Ok(Json(ApiResponse::ok(items)))
}
