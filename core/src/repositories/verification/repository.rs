//! Verification record repository trait.
//!
//! The mutating operations are conditional updates: each carries the state
//! the caller read, and reports through its return value whether the store
//! still matched it. Two racing issuances or verifications for the same
//! email therefore cannot both win — one of the guarded writes loses and
//! the caller re-evaluates. No cross-email coordination exists.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::email_verification::EmailVerification;
use crate::errors::DomainError;

/// Repository trait for verification record persistence
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Fetch the active record for a normalized email address
    async fn find_by_email(&self, email: &str)
        -> Result<Option<EmailVerification>, DomainError>;

    /// Insert the first record for an email.
    ///
    /// Returns `false` when a record already exists (a concurrent issuance
    /// created it first).
    async fn insert(&self, record: &EmailVerification) -> Result<bool, DomainError>;

    /// Replace the record contents on re-issuance, guarded by the
    /// `last_sent_at` the caller read.
    ///
    /// Returns `false` when the stored record no longer matches, i.e. a
    /// concurrent issuance already rotated the code.
    async fn replace_code(
        &self,
        record: &EmailVerification,
        expected_last_sent_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Increment the attempt counter, guarded by the code hash and attempt
    /// count the caller read.
    ///
    /// Returns `false` when the guard fails, so two concurrent failed
    /// verifications cannot both increment from the same stale read.
    async fn increment_attempts(
        &self,
        email: &str,
        code_hash: &str,
        expected_attempts: i32,
    ) -> Result<bool, DomainError>;

    /// Delete the record if it still holds the given code hash.
    ///
    /// This is the success claim: exactly one of several concurrent correct
    /// submissions observes `true`.
    async fn delete_matching(&self, email: &str, code_hash: &str)
        -> Result<bool, DomainError>;

    /// Remove expired records (storage hygiene; correctness never depends
    /// on this running)
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}
