//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection
//! - `mail` - Outbound email delivery configuration
//! - `server` - HTTP server configuration
//! - `verification` - Email verification limits and hashing configuration

pub mod database;
pub mod environment;
pub mod mail;
pub mod server;
pub mod verification;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use mail::MailConfig;
pub use server::ServerConfig;
pub use verification::VerificationConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment the application runs in
    #[serde(default)]
    pub environment: Environment,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Email delivery configuration
    #[serde(default)]
    pub mail: MailConfig,

    /// Verification code limits and hashing configuration
    #[serde(default)]
    pub verification: VerificationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            mail: MailConfig::default(),
            verification: VerificationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Validate cross-field constraints that serde cannot express.
    ///
    /// Plaintext code exposure is a development convenience only; a
    /// production configuration that enables it is rejected outright.
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.mail.expose_code_to_caller {
            return Err(
                "mail.expose_code_to_caller must be disabled in production".to_string(),
            );
        }
        if self.verification.max_attempts == 0 {
            return Err("verification.max_attempts must be at least 1".to_string());
        }
        if self.verification.hourly_send_limit == 0 {
            return Err("verification.hourly_send_limit must be at least 1".to_string());
        }
        Ok(())
    }
}
