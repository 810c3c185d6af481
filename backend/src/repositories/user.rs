//! User repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// User record from database
///
/// `password_hash` always holds an argon2 hash, never plaintext: the
/// plaintext password is hashed before this record is ever constructed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user; `created_at` is assigned by the database
    pub async fn create(pool: &PgPool, new_user: &NewUser) -> Result<UserRecord, sqlx::Error> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (first_name, last_name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, email, username, password_hash, created_at
            "#,
        )
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Find the user whose email OR username equals the identifier
    ///
    /// The uniqueness constraints guarantee at most one match per column;
    /// no further tie-break is applied.
    pub async fn find_by_identifier(pool: &PgPool, identifier: &str) -> Result<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, first_name, last_name, email, username, password_hash, created_at
            FROM users
            WHERE email = $1 OR username = $1
            LIMIT 1
            "#,
        )
        .bind(identifier)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Check whether a sqlx error is a unique-constraint violation
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        match err {
            sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    // Query tests require a database; see tests/auth_flow_test.rs
    // (run with: cargo test -- --ignored)

    use super::*;

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        let err = sqlx::Error::RowNotFound;
        assert!(!UserRepository::is_unique_violation(&err));
    }
}
