//! User repository trait defining the interface for user data persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations handle the actual database operations while maintaining
/// the abstraction boundary between domain and infrastructure layers.
/// Email lookups expect addresses already normalized by the caller.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their normalized email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user
    ///
    /// Fails with `AuthError::EmailAlreadyRegistered` when the email is taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Check if a user exists with the given email address
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;

    /// Flip the email-verified flag for a user
    ///
    /// Returns `false` when no user with the given id exists.
    async fn mark_email_verified(&self, id: Uuid) -> Result<bool, DomainError>;
}
