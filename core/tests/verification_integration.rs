//! End-to-end flow tests for the email verification core,
//! exercised through the crate's public API.

use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use nh_core::errors::{DomainError, VerificationError};
use nh_core::repositories::{
    MockUserRepository, MockVerificationRepository, UserRepository, VerificationRepository,
};
use nh_core::services::auth::{AuthService, AuthServiceConfig, RegisterData};
use nh_core::services::verification::{
    BcryptCodeHasher, MailerTrait, VerificationService, VerificationServiceConfig,
};
use nh_shared::types::Language;

struct CapturingMailer {
    codes: Mutex<HashMap<String, Vec<String>>>,
}

impl CapturingMailer {
    fn new() -> Self {
        Self {
            codes: Mutex::new(HashMap::new()),
        }
    }

    fn codes_for(&self, email: &str) -> Vec<String> {
        self.codes
            .lock()
            .unwrap()
            .get(email)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl MailerTrait for CapturingMailer {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        _locale: Language,
    ) -> Result<String, String> {
        self.codes
            .lock()
            .unwrap()
            .entry(email.to_string())
            .or_default()
            .push(code.to_string());
        Ok(format!("msg-{}", code))
    }
}

struct Harness {
    auth: AuthService<MockVerificationRepository, MockUserRepository, BcryptCodeHasher>,
    users: Arc<MockUserRepository>,
    records: Arc<MockVerificationRepository>,
    mailer: Arc<CapturingMailer>,
}

fn harness() -> Harness {
    let users = Arc::new(MockUserRepository::new());
    let records = Arc::new(MockVerificationRepository::new());
    let mailer = Arc::new(CapturingMailer::new());

    let verification = Arc::new(VerificationService::new(
        records.clone(),
        users.clone(),
        mailer.clone(),
        Arc::new(BcryptCodeHasher::new(4)),
        VerificationServiceConfig::default(),
    ));
    let auth = AuthService::new(
        users.clone(),
        verification,
        AuthServiceConfig {
            password_hash_cost: 4,
            ..Default::default()
        },
    );

    Harness {
        auth,
        users,
        records,
        mailer,
    }
}

/// Let the resend cooldown pass without sleeping.
async fn pass_cooldown(records: &MockVerificationRepository, email: &str) {
    let mut record = records.find_by_email(email).await.unwrap().unwrap();
    record.last_sent_at -= Duration::seconds(70);
    records.put(record).await;
}

#[tokio::test]
async fn register_resend_and_verify_with_rotated_code() {
    let h = harness();
    let email = "buyer@example.com";

    h.auth
        .register(
            RegisterData {
                name: "Billie Buyer".to_string(),
                email: email.to_string(),
                password: "correct-horse-battery".to_string(),
                phone: Some("+61412345678".to_string()),
            },
            Language::English,
        )
        .await
        .unwrap();

    // Cooldown passes, a resend rotates the code
    pass_cooldown(&h.records, email).await;
    h.auth
        .send_verification_code(email, Language::English)
        .await
        .unwrap();

    let codes = h.mailer.codes_for(email);
    assert_eq!(codes.len(), 2);
    let (stale, fresh) = (&codes[0], &codes[1]);

    // The stale code was invalidated by the re-issuance
    if stale != fresh {
        let err = h.auth.verify_email(email, stale).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::CodeMismatch { .. })
        ));
    }

    // The fresh code verifies exactly once
    h.auth.verify_email(email, fresh).await.unwrap();
    let user = h.users.find_by_email(email).await.unwrap().unwrap();
    assert!(user.is_email_verified);

    let err = h.auth.verify_email(email, fresh).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::NoPendingVerification)
    ));
}

#[tokio::test]
async fn wrong_codes_exhaust_then_reissue_recovers() {
    let h = harness();
    let email = "renter@example.com";

    h.auth
        .register(
            RegisterData {
                name: "Rory Renter".to_string(),
                email: email.to_string(),
                password: "correct-horse-battery".to_string(),
                phone: None,
            },
            Language::English,
        )
        .await
        .unwrap();

    let real_code = h.mailer.codes_for(email)[0].clone();
    let wrong = if real_code == "000000" { "000001" } else { "000000" };

    // Four mismatches count down, the fifth exhausts
    for _ in 0..4 {
        let err = h.auth.verify_email(email, wrong).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::Verification(VerificationError::CodeMismatch { .. })
        ));
    }
    let err = h.auth.verify_email(email, wrong).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::AttemptsExhausted)
    ));

    // Correctness no longer matters once exhausted
    let err = h.auth.verify_email(email, &real_code).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Verification(VerificationError::AttemptsExhausted)
    ));

    // A fresh issuance resets the budget and verifies
    pass_cooldown(&h.records, email).await;
    h.auth
        .send_verification_code(email, Language::English)
        .await
        .unwrap();
    let fresh = h.mailer.codes_for(email).last().unwrap().clone();
    h.auth.verify_email(email, &fresh).await.unwrap();
}
