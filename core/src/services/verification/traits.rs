//! Trait for outbound email delivery

use async_trait::async_trait;
use nh_shared::types::Language;

/// Trait for delivering verification codes by email.
///
/// Delivery is fire-and-forget from the orchestrator's perspective:
/// a failure is logged and surfaced as `otp_sent: false`, never rolled
/// back into the issuance itself.
#[async_trait]
pub trait MailerTrait: Send + Sync {
    /// Send a verification code to an email address.
    ///
    /// Returns a provider message id on success, an error description on
    /// failure. `locale` selects the subject and body language.
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        locale: Language,
    ) -> Result<String, String>;
}
