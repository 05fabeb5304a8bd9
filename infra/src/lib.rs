//! # NestHaven Infrastructure
//!
//! Infrastructure layer for the NestHaven backend: MySQL implementations of
//! the core repository traits, outbound email delivery, and connection pool
//! management.

pub mod database;
pub mod mail;

use thiserror::Error;

/// Infrastructure-level errors raised while wiring external services
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub use database::connection::DatabasePool;
pub use database::mysql::{MySqlUserRepository, MySqlVerificationRepository};
pub use mail::{create_mailer, MockMailer, SmtpMailer};
