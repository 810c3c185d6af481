//! User signup route

use crate::error::{ApiError, ApiResult};
use crate::services::UserService;
use crate::state::AppState;
use auth_api_shared::types::{RegisterRequest, StatusResponse};
use axum::{extract::State, Json};
use validator::Validate;

/// Register a new user
///
/// POST /api/users
///
/// Returns a bare status acknowledgement; signup deliberately does not log
/// the user in.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<Json<StatusResponse>> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    UserService::register(
        state.db(),
        &req.first_name,
        &req.last_name,
        &req.email,
        &req.password,
    )
    .await?;

    Ok(Json(StatusResponse {
        status: "success".to_string(),
    }))
}
