//! Email verification limits configuration

use serde::{Deserialize, Serialize};

/// Limits and hashing parameters for the email verification flow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minutes before an issued code expires
    #[serde(default = "default_code_expiration_minutes")]
    pub code_expiration_minutes: i64,

    /// Minimum seconds between consecutive code issuances per email
    #[serde(default = "default_resend_cooldown_seconds")]
    pub resend_cooldown_seconds: i64,

    /// Maximum codes issued per email within one send window
    #[serde(default = "default_hourly_send_limit")]
    pub hourly_send_limit: i32,

    /// Length of the rolling send window in seconds
    #[serde(default = "default_send_window_seconds")]
    pub send_window_seconds: i64,

    /// Maximum failed verification attempts per code
    #[serde(default = "default_max_attempts")]
    pub max_attempts: i32,

    /// bcrypt cost factor for code and password hashing
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: default_code_expiration_minutes(),
            resend_cooldown_seconds: default_resend_cooldown_seconds(),
            hourly_send_limit: default_hourly_send_limit(),
            send_window_seconds: default_send_window_seconds(),
            max_attempts: default_max_attempts(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

fn default_code_expiration_minutes() -> i64 {
    10
}

fn default_resend_cooldown_seconds() -> i64 {
    60
}

fn default_hourly_send_limit() -> i32 {
    3
}

fn default_send_window_seconds() -> i64 {
    3600
}

fn default_max_attempts() -> i32 {
    5
}

fn default_bcrypt_cost() -> u32 {
    10
}
