//! MySQL implementation of the user repository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::{debug, error};
use uuid::Uuid;

use nh_core::domain::entities::user::User;
use nh_core::errors::{AuthError, DomainError};
use nh_core::repositories::UserRepository;
use nh_shared::utils::email::mask_email;

use super::{internal, is_duplicate_key};

/// User repository backed by MySQL
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new repository over a connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> Result<User, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| internal("Failed to read user id", e))?;
        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| internal("Invalid user id", e))?,
            name: row
                .try_get("name")
                .map_err(|e| internal("Failed to read name", e))?,
            email: row
                .try_get("email")
                .map_err(|e| internal("Failed to read email", e))?,
            phone: row
                .try_get("phone")
                .map_err(|e| internal("Failed to read phone", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| internal("Failed to read password_hash", e))?,
            is_email_verified: row
                .try_get("is_email_verified")
                .map_err(|e| internal("Failed to read is_email_verified", e))?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| internal("Failed to read created_at", e))?,
            updated_at: row
                .try_get("updated_at")
                .map_err(|e| internal("Failed to read updated_at", e))?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, name, email, phone, password_hash,
                   is_email_verified, created_at, updated_at
            FROM users
            WHERE email = ?
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find user by email", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, name, email, phone, password_hash,
                   is_email_verified, created_at, updated_at
            FROM users
            WHERE id = ?
        "#;

        let row = sqlx::query(query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find user by id", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (
                id, name, email, phone, password_hash,
                is_email_verified, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.phone)
            .bind(&user.password_hash)
            .bind(user.is_email_verified)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    return AuthError::EmailAlreadyRegistered.into();
                }
                error!(
                    email = %mask_email(&user.email),
                    error = %e,
                    "Failed to create user"
                );
                internal("Failed to create user", e)
            })?;

        debug!(
            email = %mask_email(&user.email),
            user_id = %user.id,
            "Created user"
        );

        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let query = "SELECT 1 FROM users WHERE email = ? LIMIT 1";

        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to check user existence", e))?;

        Ok(row.is_some())
    }

    async fn mark_email_verified(&self, id: Uuid) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users
            SET is_email_verified = TRUE, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(Utc::now())
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to mark email verified", e))?;

        Ok(result.rows_affected() > 0)
    }
}
