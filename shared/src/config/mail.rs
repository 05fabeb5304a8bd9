//! Outbound email delivery configuration

use serde::{Deserialize, Serialize};

/// Configuration for the email delivery service
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Mail provider: "smtp" for a real relay, "mock" for console output
    #[serde(default = "default_provider")]
    pub provider: String,

    /// SMTP relay hostname
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP relay port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username (empty for unauthenticated relays)
    #[serde(default)]
    pub smtp_username: String,

    /// SMTP password
    #[serde(default)]
    pub smtp_password: String,

    /// Sender address used on outgoing mail
    #[serde(default = "default_from_address")]
    pub from_address: String,

    /// Echo the plaintext verification code back to the API caller.
    ///
    /// Development convenience for local clients without a mailbox.
    /// `AppConfig::validate` rejects this flag in production.
    #[serde(default)]
    pub expose_code_to_caller: bool,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_address: default_from_address(),
            expose_code_to_caller: false,
        }
    }
}

fn default_provider() -> String {
    String::from("mock")
}

fn default_smtp_host() -> String {
    String::from("localhost")
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    String::from("NestHaven <no-reply@nesthaven.com>")
}
