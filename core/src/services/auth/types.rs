//! Types for authentication service operations

use uuid::Uuid;

/// Input for a registration request
#[derive(Debug, Clone)]
pub struct RegisterData {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Result of a successful registration
#[derive(Debug, Clone)]
pub struct RegistrationResult {
    /// Identifier of the created account
    pub user_id: Uuid,
    /// Always true: the account starts unverified
    pub requires_email_verification: bool,
    /// Whether the first verification email was delivered
    pub otp_sent: bool,
    /// Seconds until the issued code expires, when issuance succeeded
    pub expires_in: Option<i64>,
    /// Plaintext code, present only when the dev-expose flag is enabled
    pub dev_otp: Option<String>,
}
