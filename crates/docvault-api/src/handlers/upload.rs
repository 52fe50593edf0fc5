//! Multipart upload handler.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_entity::file::ConflictStrategy;
use docvault_service::{UploadOutcome, UploadRequest};

use crate::dto::request::parse_optional_id;
use crate::dto::response::{
    ApiResponse, FileResponse, UploadCancelledResponse, UploadConflictResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

struct UploadedPart {
    file_name: String,
    mime_type: String,
    data: Bytes,
}

fn multipart_error(state: &AppState, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::validation(format!(
            "File size must be less than {}MB",
            state.upload_service.max_upload_size() / (1024 * 1024)
        ))
    } else {
        AppError::validation(format!("Multipart error: {}", err.body_text()))
    }
}

/// POST /api/upload
///
/// Fields: `file` (required), `folderId`, `conflictResolution`
/// (`overwrite` | `keep-both` | `cancel`).
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut folder_id: Option<Uuid> = None;
    let mut strategy: Option<ConflictStrategy> = None;
    let mut part: Option<UploadedPart> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&state, e))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_MIME_TYPE)
                    .to_string();
                let data = field.bytes().await.map_err(|e| multipart_error(&state, e))?;
                part = Some(UploadedPart {
                    file_name,
                    mime_type,
                    data,
                });
            }
            "folderId" => {
                let text = field.text().await.map_err(|e| multipart_error(&state, e))?;
                folder_id = parse_optional_id(&text)
                    .map_err(|_| AppError::validation("Invalid folderId"))?;
            }
            "conflictResolution" => {
                let text = field.text().await.map_err(|e| multipart_error(&state, e))?;
                if !text.trim().is_empty() {
                    strategy = Some(text.parse()?);
                }
            }
            _ => {}
        }
    }

    let part = part.ok_or_else(|| AppError::validation("No file provided"))?;

    let outcome = state
        .upload_service
        .upload(
            &auth,
            UploadRequest {
                data: part.data,
                original_name: part.file_name,
                mime_type: part.mime_type,
                folder_id,
                strategy,
            },
        )
        .await?;

    let response = match outcome {
        UploadOutcome::Created(file) => (
            StatusCode::CREATED,
            Json(ApiResponse::ok(FileResponse::from(file))),
        )
            .into_response(),
        UploadOutcome::Conflict { file_name } => (
            StatusCode::CONFLICT,
            Json(UploadConflictResponse {
                success: false,
                conflict: true,
                file_name,
            }),
        )
            .into_response(),
        UploadOutcome::Cancelled => (
            StatusCode::OK,
            Json(UploadCancelledResponse {
                success: true,
                cancelled: true,
            }),
        )
            .into_response(),
    };

    Ok(response)
}
