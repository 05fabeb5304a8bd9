//! MySQL implementation of the verification record repository
//!
//! Every mutating query is a single statement whose WHERE clause carries
//! the state the caller read, so the database is the arbiter between
//! concurrent requests for the same email. `rows_affected` reports who won.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::debug;

use nh_core::domain::entities::email_verification::EmailVerification;
use nh_core::errors::DomainError;
use nh_core::repositories::VerificationRepository;
use nh_shared::utils::email::mask_email;

use super::{internal, is_duplicate_key};

/// Verification record repository backed by MySQL
pub struct MySqlVerificationRepository {
    pool: MySqlPool,
}

impl MySqlVerificationRepository {
    /// Create a new repository over a connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &MySqlRow) -> Result<EmailVerification, DomainError> {
        Ok(EmailVerification {
            email: row
                .try_get("email")
                .map_err(|e| internal("Failed to read email", e))?,
            code_hash: row
                .try_get("code_hash")
                .map_err(|e| internal("Failed to read code_hash", e))?,
            attempts: row
                .try_get("attempts")
                .map_err(|e| internal("Failed to read attempts", e))?,
            send_count: row
                .try_get("send_count")
                .map_err(|e| internal("Failed to read send_count", e))?,
            window_started_at: row
                .try_get("window_started_at")
                .map_err(|e| internal("Failed to read window_started_at", e))?,
            last_sent_at: row
                .try_get("last_sent_at")
                .map_err(|e| internal("Failed to read last_sent_at", e))?,
            expires_at: row
                .try_get("expires_at")
                .map_err(|e| internal("Failed to read expires_at", e))?,
            created_at: row
                .try_get("created_at")
                .map_err(|e| internal("Failed to read created_at", e))?,
        })
    }
}

#[async_trait]
impl VerificationRepository for MySqlVerificationRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<EmailVerification>, DomainError> {
        let query = r#"
            SELECT email, code_hash, attempts, send_count,
                   window_started_at, last_sent_at, expires_at, created_at
            FROM email_verifications
            WHERE email = ?
        "#;

        let row = sqlx::query(query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find verification record", e))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn insert(&self, record: &EmailVerification) -> Result<bool, DomainError> {
        let query = r#"
            INSERT INTO email_verifications (
                email, code_hash, attempts, send_count,
                window_started_at, last_sent_at, expires_at, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(&record.email)
            .bind(&record.code_hash)
            .bind(record.attempts)
            .bind(record.send_count)
            .bind(record.window_started_at)
            .bind(record.last_sent_at)
            .bind(record.expires_at)
            .bind(record.created_at)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                debug!(
                    email = %mask_email(&record.email),
                    "Stored first verification record"
                );
                Ok(true)
            }
            // A concurrent issuance inserted first
            Err(e) if is_duplicate_key(&e) => Ok(false),
            Err(e) => Err(internal("Failed to insert verification record", e)),
        }
    }

    async fn replace_code(
        &self,
        record: &EmailVerification,
        expected_last_sent_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE email_verifications
            SET code_hash = ?, attempts = ?, send_count = ?,
                window_started_at = ?, last_sent_at = ?, expires_at = ?
            WHERE email = ? AND last_sent_at = ?
        "#;

        let result = sqlx::query(query)
            .bind(&record.code_hash)
            .bind(record.attempts)
            .bind(record.send_count)
            .bind(record.window_started_at)
            .bind(record.last_sent_at)
            .bind(record.expires_at)
            .bind(&record.email)
            .bind(expected_last_sent_at)
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to replace verification code", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_attempts(
        &self,
        email: &str,
        code_hash: &str,
        expected_attempts: i32,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE email_verifications
            SET attempts = attempts + 1
            WHERE email = ? AND code_hash = ? AND attempts = ?
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .bind(code_hash)
            .bind(expected_attempts)
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to increment attempts", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_matching(
        &self,
        email: &str,
        code_hash: &str,
    ) -> Result<bool, DomainError> {
        let query = "DELETE FROM email_verifications WHERE email = ? AND code_hash = ?";

        let result = sqlx::query(query)
            .bind(email)
            .bind(code_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to consume verification record", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let query = "DELETE FROM email_verifications WHERE expires_at <= ?";

        let result = sqlx::query(query)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to delete expired records", e))?;

        let deleted = result.rows_affected();
        if deleted > 0 {
            debug!(deleted = deleted, "Removed expired verification records");
        }

        Ok(deleted)
    }
}
