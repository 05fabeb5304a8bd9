//! Unit tests for the verification service

use chrono::Duration;
use std::sync::Arc;

use nh_shared::types::Language;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError, VerificationError};
use crate::repositories::{
    MockUserRepository, MockVerificationRepository, UserRepository, VerificationRepository,
};
use crate::services::verification::{
    BcryptCodeHasher, VerificationService, VerificationServiceConfig,
};

use super::mocks::MockMailer;

const EMAIL: &str = "user@example.com";

struct Fixture {
    service: VerificationService<MockVerificationRepository, MockUserRepository, BcryptCodeHasher>,
    verification_repo: Arc<MockVerificationRepository>,
    user_repo: Arc<MockUserRepository>,
    mailer: Arc<MockMailer>,
}

fn fixture_with(expose_code: bool, mailer_fails: bool) -> Fixture {
    let user = User::new(
        "Test User".to_string(),
        EMAIL.to_string(),
        None,
        "$2b$04$password-hash".to_string(),
    );
    let user_repo = Arc::new(MockUserRepository::with_users(vec![user]));
    let verification_repo = Arc::new(MockVerificationRepository::new());
    let mailer = Arc::new(MockMailer::new(mailer_fails));
    let config = VerificationServiceConfig {
        expose_code_to_caller: expose_code,
        ..Default::default()
    };

    let service = VerificationService::new(
        verification_repo.clone(),
        user_repo.clone(),
        mailer.clone(),
        Arc::new(BcryptCodeHasher::new(4)),
        config,
    );

    Fixture {
        service,
        verification_repo,
        user_repo,
        mailer,
    }
}

fn fixture() -> Fixture {
    fixture_with(false, false)
}

fn verification_error(err: DomainError) -> VerificationError {
    match err {
        DomainError::Verification(e) => e,
        other => panic!("expected verification error, got {:?}", other),
    }
}

/// Move the stored record back in time so cooldowns and windows elapse
/// without sleeping.
async fn rewind_record(
    repo: &MockVerificationRepository,
    email: &str,
    last_sent: i64,
    window: i64,
) {
    let mut record = repo.find_by_email(email).await.unwrap().unwrap();
    record.last_sent_at -= Duration::seconds(last_sent);
    record.window_started_at -= Duration::seconds(window);
    repo.put(record).await;
}

#[tokio::test]
async fn test_issue_creates_record_and_sends_code() {
    let f = fixture();

    let result = f.service.issue_code(EMAIL, Language::English).await.unwrap();

    assert_eq!(result.expires_in, 600);
    assert!(result.otp_sent);
    assert!(result.message_id.is_some());
    assert!(result.dev_code.is_none());

    let record = f.verification_repo.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(record.send_count, 1);
    assert_eq!(record.attempts, 0);

    let code = f.mailer.last_code_for(EMAIL).unwrap();
    assert_eq!(code.len(), 6);
    // The store holds a hash, never the plaintext
    assert_ne!(record.code_hash, code);
}

#[tokio::test]
async fn test_issue_unknown_email() {
    let f = fixture();

    let err = f
        .service
        .issue_code("stranger@example.com", Language::English)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Auth(AuthError::UserNotFound)));
}

#[tokio::test]
async fn test_issue_rejects_verified_account() {
    let f = fixture();
    let user = f.user_repo.find_by_email(EMAIL).await.unwrap().unwrap();
    f.user_repo.mark_email_verified(user.id).await.unwrap();

    let err = f.service.issue_code(EMAIL, Language::English).await.unwrap_err();
    assert!(matches!(
        verification_error(err),
        VerificationError::AlreadyVerified
    ));
}

#[tokio::test]
async fn test_issue_normalizes_email() {
    let f = fixture();

    f.service
        .issue_code("  User@Example.COM ", Language::English)
        .await
        .unwrap();

    assert!(f
        .verification_repo
        .find_by_email(EMAIL)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_resend_within_cooldown_rejected() {
    let f = fixture();
    f.service.issue_code(EMAIL, Language::English).await.unwrap();

    let err = f.service.issue_code(EMAIL, Language::English).await.unwrap_err();
    match verification_error(err) {
        VerificationError::CooldownActive {
            retry_after_seconds,
        } => assert!(retry_after_seconds > 0 && retry_after_seconds <= 60),
        other => panic!("expected cooldown, got {:?}", other),
    }
}

#[tokio::test]
async fn test_resend_after_cooldown_rotates_code() {
    let f = fixture();
    f.service.issue_code(EMAIL, Language::English).await.unwrap();
    let first_code = f.mailer.last_code_for(EMAIL).unwrap();

    rewind_record(&f.verification_repo, EMAIL, 70, 70).await;
    f.service.issue_code(EMAIL, Language::English).await.unwrap();
    let second_code = f.mailer.last_code_for(EMAIL).unwrap();

    let record = f.verification_repo.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(record.send_count, 2);
    assert_eq!(record.attempts, 0);

    // The stale code no longer matches the stored hash
    if first_code != second_code {
        let err = f.service.verify_code(EMAIL, &first_code).await.unwrap_err();
        assert!(matches!(
            verification_error(err),
            VerificationError::CodeMismatch { .. }
        ));
    }

    // The fresh code verifies
    f.service.verify_code(EMAIL, &second_code).await.unwrap();
}

#[tokio::test]
async fn test_fourth_send_within_window_rejected() {
    let f = fixture();

    f.service.issue_code(EMAIL, Language::English).await.unwrap();
    for _ in 0..2 {
        rewind_record(&f.verification_repo, EMAIL, 61, 0).await;
        f.service.issue_code(EMAIL, Language::English).await.unwrap();
    }
    let record = f.verification_repo.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(record.send_count, 3);

    rewind_record(&f.verification_repo, EMAIL, 61, 0).await;
    let err = f.service.issue_code(EMAIL, Language::English).await.unwrap_err();
    match verification_error(err) {
        VerificationError::ResendLimitExceeded {
            retry_after_seconds,
        } => assert!(retry_after_seconds > 0),
        other => panic!("expected resend limit, got {:?}", other),
    }
}

#[tokio::test]
async fn test_send_count_resets_after_window() {
    let f = fixture();

    f.service.issue_code(EMAIL, Language::English).await.unwrap();
    for _ in 0..2 {
        rewind_record(&f.verification_repo, EMAIL, 61, 0).await;
        f.service.issue_code(EMAIL, Language::English).await.unwrap();
    }

    // Window elapses; the cap no longer applies and the counter restarts
    rewind_record(&f.verification_repo, EMAIL, 3601, 3601).await;
    f.service.issue_code(EMAIL, Language::English).await.unwrap();

    let record = f.verification_repo.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(record.send_count, 1);
}

#[tokio::test]
async fn test_verify_success_is_one_time() {
    let f = fixture();
    f.service.issue_code(EMAIL, Language::English).await.unwrap();
    let code = f.mailer.last_code_for(EMAIL).unwrap();

    f.service.verify_code(EMAIL, &code).await.unwrap();

    let user = f.user_repo.find_by_email(EMAIL).await.unwrap().unwrap();
    assert!(user.is_email_verified);
    assert!(f
        .verification_repo
        .find_by_email(EMAIL)
        .await
        .unwrap()
        .is_none());

    // Replaying the correct code finds nothing to verify
    let err = f.service.verify_code(EMAIL, &code).await.unwrap_err();
    assert!(matches!(
        verification_error(err),
        VerificationError::NoPendingVerification
    ));
}

#[tokio::test]
async fn test_verify_without_pending_record() {
    let f = fixture();

    let err = f.service.verify_code(EMAIL, "123456").await.unwrap_err();
    assert!(matches!(
        verification_error(err),
        VerificationError::NoPendingVerification
    ));
}

#[tokio::test]
async fn test_verify_rejects_malformed_code_before_store() {
    let f = fixture();

    for bad in ["12345", "1234567", "12a456", "      "] {
        let err = f.service.verify_code(EMAIL, bad).await.unwrap_err();
        assert!(
            matches!(err, DomainError::ValidationErr(_)),
            "expected validation error for {:?}",
            bad
        );
    }
}

#[tokio::test]
async fn test_verify_expired_code_rejected() {
    let f = fixture();
    f.service.issue_code(EMAIL, Language::English).await.unwrap();
    let code = f.mailer.last_code_for(EMAIL).unwrap();

    let mut record = f.verification_repo.find_by_email(EMAIL).await.unwrap().unwrap();
    record.expires_at -= Duration::minutes(11);
    f.verification_repo.put(record).await;

    // Even the correct code is refused once expired
    let err = f.service.verify_code(EMAIL, &code).await.unwrap_err();
    assert!(matches!(
        verification_error(err),
        VerificationError::CodeExpired
    ));
}

#[tokio::test]
async fn test_attempts_count_down_to_exhaustion() {
    let f = fixture();
    f.service.issue_code(EMAIL, Language::English).await.unwrap();
    let code = f.mailer.last_code_for(EMAIL).unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    for expected_left in (1..=4).rev() {
        let err = f.service.verify_code(EMAIL, wrong).await.unwrap_err();
        match verification_error(err) {
            VerificationError::CodeMismatch { attempts_left } => {
                assert_eq!(attempts_left, expected_left)
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    // Fifth wrong attempt exhausts the budget
    let err = f.service.verify_code(EMAIL, wrong).await.unwrap_err();
    assert!(matches!(
        verification_error(err),
        VerificationError::AttemptsExhausted
    ));

    // The correct code is refused once exhausted
    let err = f.service.verify_code(EMAIL, &code).await.unwrap_err();
    assert!(matches!(
        verification_error(err),
        VerificationError::AttemptsExhausted
    ));
}

#[tokio::test]
async fn test_reissue_resets_attempts_and_allows_verification() {
    let f = fixture();
    f.service.issue_code(EMAIL, Language::English).await.unwrap();
    let code = f.mailer.last_code_for(EMAIL).unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    for _ in 0..5 {
        let _ = f.service.verify_code(EMAIL, wrong).await;
    }

    rewind_record(&f.verification_repo, EMAIL, 61, 0).await;
    f.service.issue_code(EMAIL, Language::English).await.unwrap();
    let new_code = f.mailer.last_code_for(EMAIL).unwrap();

    let record = f.verification_repo.find_by_email(EMAIL).await.unwrap().unwrap();
    assert_eq!(record.attempts, 0);

    f.service.verify_code(EMAIL, &new_code).await.unwrap();
}

#[tokio::test]
async fn test_delivery_failure_keeps_code_valid() {
    let f = fixture_with(false, true);

    let result = f.service.issue_code(EMAIL, Language::English).await.unwrap();
    assert!(!result.otp_sent);
    assert!(result.message_id.is_none());

    // The stored code is still usable
    let code = f.mailer.last_code_for(EMAIL).unwrap();
    f.service.verify_code(EMAIL, &code).await.unwrap();
}

#[tokio::test]
async fn test_dev_code_exposure_is_opt_in() {
    let f = fixture_with(true, false);

    let result = f.service.issue_code(EMAIL, Language::English).await.unwrap();
    let dev_code = result.dev_code.expect("dev code should be exposed");
    assert_eq!(dev_code, f.mailer.last_code_for(EMAIL).unwrap());
}

#[tokio::test]
async fn test_purge_expired_removes_only_dead_records() {
    let f = fixture();
    f.service.issue_code(EMAIL, Language::English).await.unwrap();

    assert_eq!(f.service.purge_expired().await.unwrap(), 0);

    let mut record = f.verification_repo.find_by_email(EMAIL).await.unwrap().unwrap();
    record.expires_at -= Duration::minutes(11);
    f.verification_repo.put(record).await;

    assert_eq!(f.service.purge_expired().await.unwrap(), 1);
}
