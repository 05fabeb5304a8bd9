//! Verification service module for email-based account verification
//!
//! This module provides the complete verification code workflow:
//! - Code generation from an OS CSPRNG
//! - One-way code hashing and verification
//! - Cooldown and hourly send limiting driven by the stored record
//! - Issuance and verification orchestration with one-time-use semantics
//! - Delivery through a pluggable mailer

pub mod code_generator;
pub mod hasher;
pub mod rate_limiter;

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use code_generator::generate_code;
pub use config::VerificationServiceConfig;
pub use hasher::{BcryptCodeHasher, CodeHasher};
pub use service::VerificationService;
pub use traits::MailerTrait;
pub use types::IssueCodeResult;
