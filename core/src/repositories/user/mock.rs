//! In-memory implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::repository::UserRepository;

/// Mock user repository backed by a HashMap
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MockUserRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a mock repository pre-seeded with users
    pub fn with_users(users: Vec<User>) -> Self {
        let map = users.into_iter().map(|u| (u.id, u)).collect();
        Self {
            users: Arc::new(RwLock::new(map)),
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| u.email == email))
    }

    async fn mark_email_verified(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.verify_email();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
