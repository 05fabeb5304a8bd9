//! Mock mailer for verification service tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use nh_shared::types::Language;

use crate::services::verification::traits::MailerTrait;

/// Mock mailer capturing the codes handed to it.
///
/// Codes are captured even when failure is simulated, so tests can prove
/// that an undelivered code is still valid.
pub struct MockMailer {
    pub sent_codes: Arc<Mutex<HashMap<String, String>>>,
    pub should_fail: bool,
}

impl MockMailer {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_codes: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent_codes.lock().unwrap().get(email).cloned()
    }

    pub fn sent_count(&self) -> usize {
        self.sent_codes.lock().unwrap().len()
    }
}

#[async_trait]
impl MailerTrait for MockMailer {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        _locale: Language,
    ) -> Result<String, String> {
        self.sent_codes
            .lock()
            .unwrap()
            .insert(email.to_string(), code.to_string());
        if self.should_fail {
            return Err("mail relay unavailable".to_string());
        }
        Ok(format!("mock-msg-{}", email))
    }
}
