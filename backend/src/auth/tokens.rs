//! JWT token signing and verification
//!
//! Access and refresh tokens are signed under two independent secrets with
//! pre-computed keys cached in `AppState`. Both tokens are self-contained:
//! validity is determined solely by signature and expiration at verification
//! time, with no server-side state.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Name of the refresh token cookie
pub const REFRESH_COOKIE: &str = "x-refresh-token";

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Parse the subject claim as a user ID
    pub fn user_id(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| anyhow::anyhow!("Invalid user ID in token"))
    }
}

/// Pre-computed key pair for one signing secret
///
/// Keys are expensive to derive, so they are created once at startup and
/// shared via Arc.
#[derive(Clone)]
struct KeyPair {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl KeyPair {
    fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// Token service holding the access and refresh key pairs
///
/// Create once at application startup and store in `AppState`; cloning is
/// cheap due to Arc-wrapped keys.
#[derive(Clone)]
pub struct TokenService {
    access: KeyPair,
    refresh: KeyPair,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenService {
    pub fn new(
        access_secret: &str,
        refresh_secret: &str,
        access_ttl_secs: i64,
        refresh_ttl_secs: i64,
    ) -> Self {
        Self {
            access: KeyPair::new(access_secret),
            refresh: KeyPair::new(refresh_secret),
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    /// Issue a short-lived access token for a user
    #[inline]
    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String> {
        Self::sign(&self.access, user_id, self.access_ttl_secs)
    }

    /// Issue a long-lived refresh token for a user
    #[inline]
    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<String> {
        Self::sign(&self.refresh, user_id, self.refresh_ttl_secs)
    }

    fn sign(keys: &KeyPair, user_id: Uuid, ttl_secs: i64) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(ttl_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {}", e))
    }

    /// Verify an access token's signature and expiration
    #[inline]
    pub fn verify_access_token(&self, token: &str) -> Result<Claims> {
        Self::verify(&self.access, token, &Validation::default())
    }

    /// Verify a refresh token's signature and expiration
    #[inline]
    pub fn verify_refresh_token(&self, token: &str) -> Result<Claims> {
        Self::verify(&self.refresh, token, &Validation::default())
    }

    /// Verify an access token's signature while ignoring its expiration
    ///
    /// Used by the gating middleware: an expired access token is accepted at
    /// face value as long as its signature checks out, so that a client with
    /// a live session never sees a hard 401 from access expiry alone.
    pub fn verify_access_token_allow_expired(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.validate_exp = false;
        Self::verify(&self.access, token, &validation)
    }

    fn verify(keys: &KeyPair, token: &str, validation: &Validation) -> Result<Claims> {
        let data = decode::<Claims>(token, &keys.decoding, validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> TokenService {
        TokenService::new("access-test-secret", "refresh-test-secret", 600, 604_800)
    }

    #[test]
    fn test_issue_and_verify_access_token() {
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service.issue_access_token(user_id).unwrap();
        let claims = service.verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_issue_and_verify_refresh_token() {
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service.issue_refresh_token(user_id).unwrap();
        let claims = service.verify_refresh_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
    }

    #[test]
    fn test_access_token_rejected_as_refresh() {
        // The two token families are signed under independent secrets
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service.issue_access_token(user_id).unwrap();
        assert!(service.verify_refresh_token(&token).is_err());
    }

    #[test]
    fn test_refresh_token_rejected_as_access() {
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service.issue_refresh_token(user_id).unwrap();
        assert!(service.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = create_test_service();
        let other = TokenService::new("other-access", "other-refresh", 600, 604_800);
        let user_id = Uuid::new_v4();

        let token = other.issue_refresh_token(user_id).unwrap();
        assert!(service.verify_refresh_token(&token).is_err());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_test_service();
        assert!(service.verify_access_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_expired_access_token_rejected() {
        // TTL well past the default 60s decode leeway
        let service =
            TokenService::new("access-test-secret", "refresh-test-secret", -120, 604_800);
        let user_id = Uuid::new_v4();

        let token = service.issue_access_token(user_id).unwrap();
        assert!(service.verify_access_token(&token).is_err());
    }

    #[test]
    fn test_expired_access_token_accepted_without_exp_check() {
        let service =
            TokenService::new("access-test-secret", "refresh-test-secret", -120, 604_800);
        let user_id = Uuid::new_v4();

        let token = service.issue_access_token(user_id).unwrap();
        let claims = service.verify_access_token_allow_expired(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_expiry_is_ttl_from_issuance() {
        let service = create_test_service();
        let token = service.issue_access_token(Uuid::new_v4()).unwrap();
        let claims = service.verify_access_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 600);
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = create_test_service();
        let _cloned = service.clone(); // Arc increments only
    }
}
