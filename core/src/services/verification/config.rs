//! Configuration for the verification service

use crate::domain::entities::email_verification::{
    DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS, MAX_SENDS_PER_WINDOW, RESEND_COOLDOWN_SECONDS,
    SEND_WINDOW_SECONDS,
};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires
    pub code_expiration_minutes: i64,
    /// Minimum seconds between code issuances for the same email
    pub resend_cooldown_seconds: i64,
    /// Maximum codes issued per email within one send window
    pub hourly_send_limit: i32,
    /// Length of the rolling send window in seconds
    pub send_window_seconds: i64,
    /// Maximum number of failed verification attempts allowed
    pub max_attempts: i32,
    /// Echo the plaintext code in issuance results (development only;
    /// rejected by configuration validation in production)
    pub expose_code_to_caller: bool,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            resend_cooldown_seconds: RESEND_COOLDOWN_SECONDS,
            hourly_send_limit: MAX_SENDS_PER_WINDOW,
            send_window_seconds: SEND_WINDOW_SECONDS,
            max_attempts: MAX_ATTEMPTS,
            expose_code_to_caller: false,
        }
    }
}

impl VerificationServiceConfig {
    /// Build the service configuration from application settings
    pub fn from_settings(
        limits: &nh_shared::config::VerificationConfig,
        expose_code_to_caller: bool,
    ) -> Self {
        Self {
            code_expiration_minutes: limits.code_expiration_minutes,
            resend_cooldown_seconds: limits.resend_cooldown_seconds,
            hourly_send_limit: limits.hourly_send_limit,
            send_window_seconds: limits.send_window_seconds,
            max_attempts: limits.max_attempts,
            expose_code_to_caller,
        }
    }
}
