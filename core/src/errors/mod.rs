//! Domain-specific error types and error handling.
//!
//! Error messages here are plain English; localization happens in the
//! presentation layer.

use thiserror::Error;

/// Account-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Email address already registered")]
    EmailAlreadyRegistered,

    #[error("Registration disabled")]
    RegistrationDisabled,
}

/// Email verification flow errors
///
/// Every rejection a caller can act on is a distinct variant carrying the
/// machine-readable detail (retry seconds, attempts left) the client needs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Email address already verified")]
    AlreadyVerified,

    #[error("Resend cooldown active: retry in {retry_after_seconds}s")]
    CooldownActive { retry_after_seconds: i64 },

    #[error("Hourly send limit reached: retry in {retry_after_seconds}s")]
    ResendLimitExceeded { retry_after_seconds: i64 },

    #[error("Verification code expired")]
    CodeExpired,

    #[error("Maximum verification attempts exceeded")]
    AttemptsExhausted,

    #[error("Invalid verification code: {attempts_left} attempt(s) left")]
    CodeMismatch { attempts_left: i32 },

    #[error("No pending verification")]
    NoPendingVerification,

    #[error("Verification email could not be delivered")]
    DeliveryFailed,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email")]
    InvalidEmail,

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid length: {field} (expected: {expected}, actual: {actual})")]
    InvalidLength {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Password confirmation does not match")]
    PasswordMismatch,
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

pub type DomainResult<T> = Result<T, DomainError>;
