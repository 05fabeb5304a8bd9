//! Mock mailer implementation
//!
//! Logs verification emails instead of sending them. Used in development
//! (pair with `expose_code_to_caller` for local clients) and in tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};
use uuid::Uuid;

use nh_core::services::verification::MailerTrait;
use nh_shared::types::Language;
use nh_shared::utils::email::mask_email;

/// Mock mailer for development and testing
#[derive(Clone)]
pub struct MockMailer {
    /// Counter for messages "sent"
    message_count: Arc<AtomicU64>,
    /// Last code handed over per recipient
    last_codes: Arc<Mutex<HashMap<String, String>>>,
    /// Whether to simulate delivery failures
    simulate_failure: bool,
}

impl MockMailer {
    /// Create a new mock mailer
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            last_codes: Arc::new(Mutex::new(HashMap::new())),
            simulate_failure: false,
        }
    }

    /// Create a mock mailer that fails every send
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::new()
        }
    }

    /// Total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Last code handed over for a recipient (captured even on simulated
    /// failure, so tests can prove undelivered codes stay valid)
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.last_codes.lock().unwrap().get(email).cloned()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailerTrait for MockMailer {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        locale: Language,
    ) -> Result<String, String> {
        self.last_codes
            .lock()
            .unwrap()
            .insert(email.to_string(), code.to_string());

        if self.simulate_failure {
            warn!(
                email = %mask_email(email),
                "Mock mailer simulating delivery failure"
            );
            return Err("Simulated mail delivery failure".to_string());
        }

        let message_id = format!("mock-{}", Uuid::new_v4());
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "mail_service",
            provider = "mock",
            email = %mask_email(email),
            message_id = %message_id,
            locale = %locale,
            message_number = count,
            "Verification email sent (mock)"
        );

        Ok(message_id)
    }
}
