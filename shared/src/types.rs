//! API request and response types

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Signup request
///
/// Field constraints mirror the public API contract: names are 1-20
/// characters, passwords 5-10 characters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 20))]
    pub first_name: String,
    #[validate(length(min = 1, max = 20))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 5, max = 10))]
    pub password: String,
}

/// Login request
///
/// `unique_identifier` may be either an email address or a username.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub unique_identifier: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Access token response body for login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

/// Generic status acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register() -> RegisterRequest {
        RegisterRequest {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "abcde".to_string(),
        }
    }

    #[test]
    fn test_valid_register_request_passes() {
        assert!(valid_register().validate().is_ok());
    }

    #[test]
    fn test_empty_first_name_rejected() {
        let mut req = valid_register();
        req.first_name = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_long_last_name_rejected() {
        let mut req = valid_register();
        req.last_name = "x".repeat(21);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut req = valid_register();
        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_password_length_bounds() {
        let mut req = valid_register();
        req.password = "abcd".to_string();
        assert!(req.validate().is_err());

        req.password = "abcdefghijk".to_string();
        assert!(req.validate().is_err());

        req.password = "abcdefghij".to_string();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_login_request_requires_identifier() {
        let req = LoginRequest {
            unique_identifier: String::new(),
            password: "abcde".to_string(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_uses_camel_case() {
        let json = serde_json::to_value(valid_register()).unwrap();
        assert!(json.get("firstName").is_some());
        assert!(json.get("lastName").is_some());
        assert!(json.get("first_name").is_none());
    }

    #[test]
    fn test_access_token_response_uses_camel_case() {
        let resp = AccessTokenResponse {
            access_token: "abc".to_string(),
        };
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(json["accessToken"], "abc");
    }
}
