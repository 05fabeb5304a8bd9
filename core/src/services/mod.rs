//! Business services containing domain logic and use cases.

pub mod auth;
pub mod verification;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, RegisterData, RegistrationResult};
pub use verification::{
    CodeHasher, BcryptCodeHasher, IssueCodeResult, MailerTrait, VerificationService,
    VerificationServiceConfig,
};
