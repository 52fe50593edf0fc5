//! Current-user handler.

use axum::Json;
use axum::extract::State;

use docvault_entity::user::User;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.user_service.current(&auth).await?;
    Ok(Json(ApiResponse::ok(user)))
}
