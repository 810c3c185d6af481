//! Login and token refresh routes
//!
//! Login sets the refresh token as an HTTP-only, secure, SameSite=None
//! cookie and returns the access token in the body; refresh reads that
//! cookie back and mints a fresh access token without rotating the session.

use crate::auth::REFRESH_COOKIE;
use crate::error::{ApiError, ApiResult};
use crate::services::UserService;
use crate::state::AppState;
use auth_api_shared::types::{AccessTokenResponse, LoginRequest};
use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

/// Login with email or username
///
/// POST /api/auth
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<AccessTokenResponse>)> {
    req.validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let tokens = UserService::login(
        state.db(),
        state.tokens(),
        &req.unique_identifier,
        &req.password,
    )
    .await?;

    let mut cookie = Cookie::new(REFRESH_COOKIE, tokens.refresh_token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(true);
    cookie.set_same_site(SameSite::None);
    cookie.set_max_age(time::Duration::seconds(
        state.config.auth.refresh_cookie_max_age_secs,
    ));
    let jar = jar.add(cookie);

    Ok((
        jar,
        Json(AccessTokenResponse {
            access_token: tokens.access_token,
        }),
    ))
}

/// Mint a new access token from the refresh cookie
///
/// GET /api/auth
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<Json<AccessTokenResponse>> {
    let cookie = jar
        .get(REFRESH_COOKIE)
        .ok_or_else(|| ApiError::Unauthorized("Missing refresh token".to_string()))?;

    let access_token = UserService::refresh(state.tokens(), cookie.value())?;

    Ok(Json(AccessTokenResponse { access_token }))
}
