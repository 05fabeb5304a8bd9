//! Email delivery module
//!
//! Implementations of the core `MailerTrait`: a lettre-backed SMTP mailer
//! for real delivery and a mock that logs to the console for development
//! and tests.

pub mod mock;
pub mod smtp;

pub use mock::MockMailer;
pub use smtp::SmtpMailer;

use std::sync::Arc;

use nh_core::services::verification::MailerTrait;
use nh_shared::config::MailConfig;

use crate::InfrastructureError;

/// Create a mailer based on configuration
pub fn create_mailer(config: &MailConfig) -> Result<Arc<dyn MailerTrait>, InfrastructureError> {
    match config.provider.as_str() {
        "smtp" => Ok(Arc::new(SmtpMailer::new(config)?)),
        "mock" => Ok(Arc::new(MockMailer::new())),
        other => {
            tracing::warn!(
                provider = other,
                "Unknown mail provider, using mock implementation"
            );
            Ok(Arc::new(MockMailer::new()))
        }
    }
}
