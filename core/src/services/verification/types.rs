//! Types for verification service results

use chrono::{DateTime, Utc};

/// Result of issuing a verification code
#[derive(Debug, Clone)]
pub struct IssueCodeResult {
    /// Seconds until the issued code expires
    pub expires_in: i64,
    /// When the user can request another code
    pub next_resend_at: DateTime<Utc>,
    /// Whether the email left the building; the code is valid either way
    pub otp_sent: bool,
    /// Provider message id when delivery succeeded
    pub message_id: Option<String>,
    /// Plaintext code, present only when the dev-expose flag is enabled
    pub dev_code: Option<String>,
}
