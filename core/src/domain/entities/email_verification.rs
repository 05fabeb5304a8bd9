//! Verification record entity for email-based account verification.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Maximum number of failed verification attempts per code
pub const MAX_ATTEMPTS: i32 = 5;

/// Maximum codes issued per email within one send window
pub const MAX_SENDS_PER_WINDOW: i32 = 3;

/// Default expiration time for verification codes (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// Minimum delay between consecutive issuances (1 minute)
pub const RESEND_COOLDOWN_SECONDS: i64 = 60;

/// Length of the rolling send window (1 hour)
pub const SEND_WINDOW_SECONDS: i64 = 3600;

/// Active verification record for one email address.
///
/// At most one record exists per email; re-issuing a code replaces the
/// record contents in place. The plaintext code is never stored, only
/// its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailVerification {
    /// Email address this code was issued for (normalized)
    pub email: String,

    /// One-way hash of the current 6-digit code
    pub code_hash: String,

    /// Number of failed verification attempts against the current code
    pub attempts: i32,

    /// Number of codes issued within the current send window
    pub send_count: i32,

    /// Start of the current send window
    pub window_started_at: DateTime<Utc>,

    /// Timestamp of the most recent issuance
    pub last_sent_at: DateTime<Utc>,

    /// Timestamp when the current code expires
    pub expires_at: DateTime<Utc>,

    /// Timestamp of the first issuance for this email
    pub created_at: DateTime<Utc>,
}

impl EmailVerification {
    /// Creates the first verification record for an email address
    pub fn new(email: String, code_hash: String, now: DateTime<Utc>, expiration_minutes: i64) -> Self {
        Self {
            email,
            code_hash,
            attempts: 0,
            send_count: 1,
            window_started_at: now,
            last_sent_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            created_at: now,
        }
    }

    /// Builds the replacement record for a re-issuance.
    ///
    /// Resets the attempt counter, rotates the code hash and expiry, and
    /// either advances the send counter or opens a fresh window when the
    /// previous one has elapsed. `created_at` keeps its original meaning
    /// of first issuance.
    pub fn reissue(
        &self,
        code_hash: String,
        now: DateTime<Utc>,
        expiration_minutes: i64,
        window_seconds: i64,
    ) -> Self {
        let (send_count, window_started_at) = if self.window_elapsed(now, window_seconds) {
            (1, now)
        } else {
            (self.send_count + 1, self.window_started_at)
        };

        Self {
            email: self.email.clone(),
            code_hash,
            attempts: 0,
            send_count,
            window_started_at,
            last_sent_at: now,
            expires_at: now + Duration::minutes(expiration_minutes),
            created_at: self.created_at,
        }
    }

    /// Checks whether the code is expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Checks whether the attempt budget for the current code is spent
    pub fn attempts_exhausted(&self, max_attempts: i32) -> bool {
        self.attempts >= max_attempts
    }

    /// Gets the number of remaining verification attempts
    pub fn remaining_attempts(&self, max_attempts: i32) -> i32 {
        (max_attempts - self.attempts).max(0)
    }

    /// Seconds left before another code may be issued, zero when none
    pub fn cooldown_remaining(&self, now: DateTime<Utc>, cooldown_seconds: i64) -> i64 {
        let elapsed = (now - self.last_sent_at).num_seconds();
        (cooldown_seconds - elapsed).max(0)
    }

    /// Checks whether the current send window has elapsed
    pub fn window_elapsed(&self, now: DateTime<Utc>, window_seconds: i64) -> bool {
        (now - self.window_started_at).num_seconds() >= window_seconds
    }

    /// Seconds until the send window reopens, zero when already elapsed
    pub fn window_reopens_in(&self, now: DateTime<Utc>, window_seconds: i64) -> i64 {
        let elapsed = (now - self.window_started_at).num_seconds();
        (window_seconds - elapsed).max(0)
    }
}
