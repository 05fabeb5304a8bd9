//! Main verification service implementation

use chrono::{Duration, Utc};
use std::sync::Arc;

use nh_shared::types::Language;
use nh_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::email_verification::{EmailVerification, CODE_LENGTH};
use crate::errors::{AuthError, DomainResult, ValidationError, VerificationError};
use crate::repositories::{UserRepository, VerificationRepository};

use super::code_generator::generate_code;
use super::config::VerificationServiceConfig;
use super::hasher::CodeHasher;
use super::rate_limiter::check_issue_allowed;
use super::traits::MailerTrait;
use super::types::IssueCodeResult;

/// Verification service for handling email verification codes.
///
/// Owns the per-email state machine: `NoRecord -> Pending -> (Verified |
/// Expired | AttemptsExhausted)`. All writes go through the repository's
/// guarded updates, so concurrent requests for the same email resolve to
/// exactly one winner.
pub struct VerificationService<V, U, H>
where
    V: VerificationRepository,
    U: UserRepository,
    H: CodeHasher,
{
    /// Verification record store
    verification_repository: Arc<V>,
    /// User store, consulted for existence and the verified flag
    user_repository: Arc<U>,
    /// Outbound email delivery
    mailer: Arc<dyn MailerTrait>,
    /// Code hashing
    hasher: Arc<H>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<V, U, H> VerificationService<V, U, H>
where
    V: VerificationRepository,
    U: UserRepository,
    H: CodeHasher,
{
    /// Create a new verification service
    pub fn new(
        verification_repository: Arc<V>,
        user_repository: Arc<U>,
        mailer: Arc<dyn MailerTrait>,
        hasher: Arc<H>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            verification_repository,
            user_repository,
            mailer,
            hasher,
            config,
        }
    }

    /// Issue a verification code for an email address.
    ///
    /// This method:
    /// 1. Rejects unknown or already-verified addresses
    /// 2. Evaluates the cooldown and hourly send cap from the stored record
    /// 3. Generates and hashes a fresh code
    /// 4. Replaces the record through a guarded write (a lost race is
    ///    reported as an active cooldown - the winner's cooldown is in force)
    /// 5. Hands the plaintext code to the mailer; delivery failure leaves
    ///    the stored code valid and is surfaced as `otp_sent: false`
    pub async fn issue_code(
        &self,
        email: &str,
        locale: Language,
    ) -> DomainResult<IssueCodeResult> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.is_email_verified {
            return Err(VerificationError::AlreadyVerified.into());
        }

        let now = Utc::now();
        let existing = self.verification_repository.find_by_email(&email).await?;
        check_issue_allowed(existing.as_ref(), now, &self.config)?;

        let code = generate_code();
        let code_hash = self.hasher.hash(&code)?;

        let (record, stored) = match &existing {
            Some(prior) => {
                let record = prior.reissue(
                    code_hash,
                    now,
                    self.config.code_expiration_minutes,
                    self.config.send_window_seconds,
                );
                let stored = self
                    .verification_repository
                    .replace_code(&record, prior.last_sent_at)
                    .await?;
                (record, stored)
            }
            None => {
                let record = EmailVerification::new(
                    email.clone(),
                    code_hash,
                    now,
                    self.config.code_expiration_minutes,
                );
                let stored = self.verification_repository.insert(&record).await?;
                (record, stored)
            }
        };

        if !stored {
            // A concurrent issuance rotated the record first; its cooldown
            // now applies in full.
            tracing::warn!(
                email = %mask_email(&email),
                event = "otp_issue_conflict",
                "Concurrent issuance won the guarded write"
            );
            return Err(VerificationError::CooldownActive {
                retry_after_seconds: self.config.resend_cooldown_seconds,
            }
            .into());
        }

        tracing::info!(
            email = %mask_email(&email),
            event = "otp_issued",
            send_count = record.send_count,
            "Issued new verification code"
        );

        let (otp_sent, message_id) = match self
            .mailer
            .send_verification_code(&email, &code, locale)
            .await
        {
            Ok(message_id) => (true, Some(message_id)),
            Err(e) => {
                tracing::warn!(
                    email = %mask_email(&email),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Verification email delivery failed; code remains valid"
                );
                (false, None)
            }
        };

        let dev_code = self.config.expose_code_to_caller.then_some(code);

        Ok(IssueCodeResult {
            expires_in: self.config.code_expiration_minutes * 60,
            next_resend_at: now + Duration::seconds(self.config.resend_cooldown_seconds),
            otp_sent,
            message_id,
            dev_code,
        })
    }

    /// Verify a submitted code for an email address.
    ///
    /// This method:
    /// 1. Rejects malformed codes before touching the store
    /// 2. Refuses expired records and exhausted attempt budgets outright;
    ///    both require the caller to request a new code
    /// 3. On mismatch, increments the attempt counter through a guarded
    ///    write so concurrent failures cannot share one increment
    /// 4. On match, claims the record by deleting it (strict one-time use)
    ///    and flips the user's verified flag
    pub async fn verify_code(&self, email: &str, code: &str) -> DomainResult<()> {
        let email = normalize_email(email);

        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: "otp".to_string(),
            }
            .into());
        }

        let record = self
            .verification_repository
            .find_by_email(&email)
            .await?
            .ok_or(VerificationError::NoPendingVerification)?;

        let now = Utc::now();
        if record.is_expired_at(now) {
            tracing::info!(
                email = %mask_email(&email),
                event = "otp_expired",
                "Verification attempted against an expired code"
            );
            return Err(VerificationError::CodeExpired.into());
        }

        if record.attempts_exhausted(self.config.max_attempts) {
            return Err(VerificationError::AttemptsExhausted.into());
        }

        if !self.hasher.verify(code, &record.code_hash)? {
            return Err(self.register_failed_attempt(&email, &record).await?);
        }

        // Claim the record before flipping the flag; the loser of a
        // concurrent double-submit observes no pending verification.
        let claimed = self
            .verification_repository
            .delete_matching(&email, &record.code_hash)
            .await?;
        if !claimed {
            return Err(VerificationError::NoPendingVerification.into());
        }

        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        self.user_repository.mark_email_verified(user.id).await?;

        tracing::info!(
            email = %mask_email(&email),
            event = "email_verified",
            "Email address verified"
        );

        Ok(())
    }

    /// Record a failed attempt and report the resulting rejection.
    ///
    /// When the guarded increment loses (another verification touched the
    /// record in between), the outcome is recomputed from a fresh read.
    async fn register_failed_attempt(
        &self,
        email: &str,
        record: &EmailVerification,
    ) -> DomainResult<crate::errors::DomainError> {
        let bumped = self
            .verification_repository
            .increment_attempts(email, &record.code_hash, record.attempts)
            .await?;

        let attempts_now = if bumped {
            record.attempts + 1
        } else {
            match self.verification_repository.find_by_email(email).await? {
                Some(fresh) if fresh.code_hash == record.code_hash => fresh.attempts,
                // Record consumed or rotated while we were comparing
                _ => return Ok(VerificationError::NoPendingVerification.into()),
            }
        };

        let attempts_left = (self.config.max_attempts - attempts_now).max(0);
        tracing::warn!(
            email = %mask_email(email),
            event = "otp_mismatch",
            attempts_left = attempts_left,
            "Verification code mismatch"
        );

        if attempts_left == 0 {
            Ok(VerificationError::AttemptsExhausted.into())
        } else {
            Ok(VerificationError::CodeMismatch { attempts_left }.into())
        }
    }

    /// Remove expired verification records (storage hygiene)
    pub async fn purge_expired(&self) -> DomainResult<u64> {
        self.verification_repository.delete_expired(Utc::now()).await
    }
}
