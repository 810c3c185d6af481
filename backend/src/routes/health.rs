//! Liveness endpoint

use auth_api_shared::types::StatusResponse;
use axum::Json;

/// GET /ping - liveness check
pub async fn ping() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "running".to_string(),
    })
}
