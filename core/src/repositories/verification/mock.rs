//! In-memory implementation of VerificationRepository for testing
//!
//! The guarded updates check their expectations under a single write lock,
//! so the mock exhibits the same conditional-update semantics as the MySQL
//! implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::email_verification::EmailVerification;
use crate::errors::DomainError;

use super::repository::VerificationRepository;

/// Mock verification repository backed by a HashMap
pub struct MockVerificationRepository {
    records: Arc<RwLock<HashMap<String, EmailVerification>>>,
}

impl MockVerificationRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Overwrite a record directly, bypassing the guards (test setup)
    pub async fn put(&self, record: EmailVerification) {
        self.records
            .write()
            .await
            .insert(record.email.clone(), record);
    }
}

impl Default for MockVerificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VerificationRepository for MockVerificationRepository {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<EmailVerification>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(email).cloned())
    }

    async fn insert(&self, record: &EmailVerification) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.email) {
            return Ok(false);
        }
        records.insert(record.email.clone(), record.clone());
        Ok(true)
    }

    async fn replace_code(
        &self,
        record: &EmailVerification,
        expected_last_sent_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(&record.email) {
            Some(stored) if stored.last_sent_at == expected_last_sent_at => {
                *stored = record.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn increment_attempts(
        &self,
        email: &str,
        code_hash: &str,
        expected_attempts: i32,
    ) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(email) {
            Some(stored)
                if stored.code_hash == code_hash && stored.attempts == expected_attempts =>
            {
                stored.attempts += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_matching(
        &self,
        email: &str,
        code_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;
        match records.get(email) {
            Some(stored) if stored.code_hash == code_hash => {
                records.remove(email);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|_, record| !record.is_expired_at(now));
        Ok((before - records.len()) as u64)
    }
}
