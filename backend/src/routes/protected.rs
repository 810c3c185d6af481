//! Demo gated resource
//!
//! Reachable only through the session gate; the handler itself just serves
//! a canned payload for the authenticated user.

use crate::auth::AuthUser;
use axum::{Extension, Json};
use serde::Serialize;
use tracing::debug;

/// Gated response payload
#[derive(Serialize)]
pub struct SecretResponse {
    pub secret: String,
}

/// GET /protected - requires a valid session
pub async fn protected(Extension(user): Extension<AuthUser>) -> Json<SecretResponse> {
    debug!(user_id = %user.user_id, "Serving protected resource");
    Json(SecretResponse {
        secret: "data".to_string(),
    })
}
