//! Authentication module
//!
//! Provides JWT-based session tokens with argon2 password hashing and the
//! access-gating middleware for protected routes.

mod middleware;
mod password;
mod tokens;

pub use middleware::{require_session, AuthUser};
pub use password::PasswordService;
pub use tokens::{Claims, TokenService, REFRESH_COOKIE};
