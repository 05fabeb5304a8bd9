//! Domain entities representing core business objects.

pub mod email_verification;
pub mod user;

// Re-export commonly used types
pub use email_verification::{
    EmailVerification, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
    MAX_SENDS_PER_WINDOW, RESEND_COOLDOWN_SECONDS, SEND_WINDOW_SECONDS,
};
pub use user::User;
