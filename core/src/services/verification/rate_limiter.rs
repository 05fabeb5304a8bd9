//! Issuance rate limiting driven by the stored verification record
//!
//! The limiter owns no state of its own: cooldown and hourly cap are
//! evaluated from the record's timestamps and counters, so any node can
//! enforce the limits from shared storage alone.

use chrono::{DateTime, Utc};

use crate::domain::entities::email_verification::EmailVerification;
use crate::errors::{DomainResult, VerificationError};

use super::config::VerificationServiceConfig;

/// Check whether a new code may be issued for the email behind `record`.
///
/// Evaluates the resend cooldown first, then the per-window send cap.
/// `None` means no record exists yet and issuance is always allowed.
pub fn check_issue_allowed(
    record: Option<&EmailVerification>,
    now: DateTime<Utc>,
    config: &VerificationServiceConfig,
) -> DomainResult<()> {
    let record = match record {
        Some(record) => record,
        None => return Ok(()),
    };

    let cooldown = record.cooldown_remaining(now, config.resend_cooldown_seconds);
    if cooldown > 0 {
        return Err(VerificationError::CooldownActive {
            retry_after_seconds: cooldown,
        }
        .into());
    }

    if !record.window_elapsed(now, config.send_window_seconds)
        && record.send_count >= config.hourly_send_limit
    {
        return Err(VerificationError::ResendLimitExceeded {
            retry_after_seconds: record.window_reopens_in(now, config.send_window_seconds),
        }
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::email_verification::DEFAULT_EXPIRATION_MINUTES;
    use crate::errors::DomainError;
    use chrono::Duration;

    fn config() -> VerificationServiceConfig {
        VerificationServiceConfig::default()
    }

    fn record_at(now: DateTime<Utc>) -> EmailVerification {
        EmailVerification::new(
            "user@example.com".to_string(),
            "hash".to_string(),
            now,
            DEFAULT_EXPIRATION_MINUTES,
        )
    }

    fn unwrap_verification(err: DomainError) -> VerificationError {
        match err {
            DomainError::Verification(e) => e,
            other => panic!("expected verification error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_record_always_allowed() {
        assert!(check_issue_allowed(None, Utc::now(), &config()).is_ok());
    }

    #[test]
    fn test_cooldown_rejects_with_remaining_seconds() {
        let now = Utc::now();
        let record = record_at(now);

        let err = check_issue_allowed(Some(&record), now + Duration::seconds(18), &config())
            .unwrap_err();
        match unwrap_verification(err) {
            VerificationError::CooldownActive {
                retry_after_seconds,
            } => assert_eq!(retry_after_seconds, 42),
            other => panic!("expected cooldown, got {:?}", other),
        }
    }

    #[test]
    fn test_cooldown_boundary() {
        let now = Utc::now();
        let record = record_at(now);

        assert!(
            check_issue_allowed(Some(&record), now + Duration::seconds(59), &config()).is_err()
        );
        assert!(
            check_issue_allowed(Some(&record), now + Duration::seconds(60), &config()).is_ok()
        );
    }

    #[test]
    fn test_window_cap_rejects_fourth_send() {
        let now = Utc::now();
        let mut record = record_at(now);
        record.send_count = 3;

        // Past the cooldown but inside the window
        let err = check_issue_allowed(Some(&record), now + Duration::seconds(120), &config())
            .unwrap_err();
        match unwrap_verification(err) {
            VerificationError::ResendLimitExceeded {
                retry_after_seconds,
            } => assert_eq!(retry_after_seconds, 3480),
            other => panic!("expected resend limit, got {:?}", other),
        }
    }

    #[test]
    fn test_elapsed_window_allows_sending_again() {
        let now = Utc::now();
        let mut record = record_at(now);
        record.send_count = 3;

        let later = now + Duration::seconds(3600);
        assert!(check_issue_allowed(Some(&record), later, &config()).is_ok());
    }

    #[test]
    fn test_under_cap_allowed_after_cooldown() {
        let now = Utc::now();
        let mut record = record_at(now);
        record.send_count = 2;

        assert!(
            check_issue_allowed(Some(&record), now + Duration::seconds(61), &config()).is_ok()
        );
    }

    #[test]
    fn test_cooldown_checked_before_cap() {
        let now = Utc::now();
        let mut record = record_at(now);
        record.send_count = 3;

        // Both violated: the cooldown answer wins so the client gets the
        // shorter wait first
        let err =
            check_issue_allowed(Some(&record), now + Duration::seconds(10), &config()).unwrap_err();
        assert!(matches!(
            unwrap_verification(err),
            VerificationError::CooldownActive { .. }
        ));
    }
}
