use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Email address; normalized to lowercase before storage
    #[validate(email)]
    pub email: String,

    /// Account password
    #[validate(length(min = 8, max = 128))]
    pub password: String,

    /// Must repeat the password exactly
    #[validate(must_match(other = "password"))]
    pub confirm_password: String,

    /// Optional contact phone number
    #[validate(length(min = 7, max = 20))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(email)]
    pub email: String,

    /// 6-digit verification code; digits-only is enforced by the handler
    #[validate(length(equal = 6))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub requires_email_verification: bool,
    pub otp_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    /// Plaintext code, present only with the development expose flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_otp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    /// Seconds until the issued code expires
    pub expires_in: i64,
    /// Seconds until another code may be requested
    pub resend_after: i64,
    pub otp_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_otp: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub verified: bool,
    pub message: String,
}
