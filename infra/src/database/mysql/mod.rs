//! MySQL implementations of the core repository traits

pub mod user_repository_impl;
pub mod verification_repository_impl;

pub use user_repository_impl::MySqlUserRepository;
pub use verification_repository_impl::MySqlVerificationRepository;

use nh_core::errors::DomainError;

/// True when the error is a unique-key violation (SQLSTATE 23000)
pub(crate) fn is_duplicate_key(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23000")
        .unwrap_or(false)
}

pub(crate) fn internal(context: &str, error: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, error),
    }
}
