//! User service for signup and session authentication
//!
//! Every operation is a pure function of the request input and the
//! collaborator responses: there is no shared mutable state, and a
//! collaborator failure propagates immediately as an error.

use crate::auth::{PasswordService, TokenService};
use crate::error::ApiError;
use crate::repositories::{NewUser, UserRepository};
use sqlx::PgPool;
use tracing::debug;

/// Token pair issued at login
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user
    ///
    /// Hashes the password on the blocking thread pool and persists the
    /// user. The caller validates the request shape beforehand. Deliberately
    /// does not log the user in.
    pub async fn register(
        pool: &PgPool,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ApiError> {
        let password_hash = PasswordService::hash_async(password.to_string())
            .await
            .map_err(ApiError::Internal)?;

        let new_user = NewUser {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            password_hash,
        };

        let user = UserRepository::create(pool, &new_user).await.map_err(|e| {
            if UserRepository::is_unique_violation(&e) {
                ApiError::Conflict("Email already registered".to_string())
            } else {
                ApiError::Database(e)
            }
        })?;

        debug!(user_id = %user.id, "User registered");
        Ok(())
    }

    /// Login with an email or username plus password
    ///
    /// A lookup miss and a failed password verification both produce the
    /// same generic error, so responses carry no account-existence signal.
    pub async fn login(
        pool: &PgPool,
        tokens: &TokenService,
        unique_identifier: &str,
        password: &str,
    ) -> Result<SessionTokens, ApiError> {
        let user = UserRepository::find_by_identifier(pool, unique_identifier)
            .await
            .map_err(ApiError::Internal)?
            .ok_or(ApiError::Authentication)?;

        let valid =
            PasswordService::verify_async(password.to_string(), user.password_hash.clone())
                .await
                .map_err(ApiError::Internal)?;

        if !valid {
            return Err(ApiError::Authentication);
        }

        let access_token = tokens
            .issue_access_token(user.id)
            .map_err(ApiError::Internal)?;
        let refresh_token = tokens
            .issue_refresh_token(user.id)
            .map_err(ApiError::Internal)?;

        debug!(user_id = %user.id, "Login succeeded");
        Ok(SessionTokens {
            access_token,
            refresh_token,
        })
    }

    /// Mint a new access token from a refresh token
    ///
    /// Purely token-based: the refresh token is the sole proof of session,
    /// so no database lookup is made and the refresh token is not rotated.
    pub fn refresh(tokens: &TokenService, refresh_token: &str) -> Result<String, ApiError> {
        let claims = tokens
            .verify_refresh_token(refresh_token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

        let user_id = claims
            .user_id()
            .map_err(|_| ApiError::Unauthorized("Invalid user ID in token".to_string()))?;

        tokens
            .issue_access_token(user_id)
            .map_err(ApiError::Internal)
    }
}
