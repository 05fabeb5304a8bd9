//! User entity representing a registered account in the NestHaven system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, normalized to lowercase
    pub email: String,

    /// Optional contact phone number
    pub phone: Option<String>,

    /// bcrypt hash of the account password
    pub password_hash: String,

    /// Whether the email address has been verified
    pub is_email_verified: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new unverified user
    pub fn new(
        name: String,
        email: String,
        phone: Option<String>,
        password_hash: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            phone,
            password_hash,
            is_email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the email address as verified
    pub fn verify_email(&mut self) {
        self.is_email_verified = true;
        self.updated_at = Utc::now();
    }
}
