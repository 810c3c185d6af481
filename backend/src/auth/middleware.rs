//! Access-gating middleware
//!
//! A request reaches a protected handler only when it carries a valid
//! refresh cookie. The bearer access token is then checked with its
//! expiration ignored; whenever it is expired or unverifiable (absent,
//! malformed, wrongly signed, or carrying an unusable subject) a
//! replacement access token is minted from the refresh token's user-id
//! claim and substituted into the outgoing Authorization header for
//! downstream consumers.
//!
//! The net effect is silent access-token renewal: a client holding a live
//! session never sees a hard 401 due to access-token expiry alone.

use crate::auth::REFRESH_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderValue},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

/// Authenticated user attached to gated requests
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

/// Middleware gating protected routes
///
/// Apply via `axum::middleware::from_fn_with_state`.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // A valid refresh cookie is mandatory; its absence is fatal.
    let cookie = jar
        .get(REFRESH_COOKIE)
        .ok_or_else(|| ApiError::Unauthorized("Missing session cookie".to_string()))?;

    let refresh_claims = state
        .tokens()
        .verify_refresh_token(cookie.value())
        .map_err(|e| ApiError::Unauthorized(format!("Invalid session: {}", e)))?;

    let session_user = refresh_claims
        .user_id()
        .map_err(|_| ApiError::Unauthorized("Invalid user ID in session".to_string()))?;

    // Check the bearer access token while ignoring expiration. An expired
    // token with a good signature still authenticates the request, but gets
    // replaced so downstream consumers receive a live token.
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let verified = bearer
        .and_then(|token| {
            state
                .tokens()
                .verify_access_token_allow_expired(token)
                .ok()
        })
        .and_then(|claims| claims.user_id().ok().map(|id| (id, claims.exp)));

    let now = Utc::now().timestamp();
    let user_id = match verified {
        Some((id, exp)) if exp > now => id,
        _ => {
            // Expired or unverifiable access token: mint a replacement for
            // the session user and substitute it into the outgoing header.
            debug!(user_id = %session_user, "Reissuing access token for gated request");
            let token = state
                .tokens()
                .issue_access_token(session_user)
                .map_err(ApiError::Internal)?;
            let header = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?;
            request.headers_mut().insert(AUTHORIZATION, header);
            session_user
        }
    };

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}
