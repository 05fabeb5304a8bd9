//! One-way hashing for verification codes

use crate::errors::{DomainError, DomainResult};

/// Hashes verification codes for storage and checks candidates against
/// stored hashes.
///
/// Implementations must salt per call and must not leak where a candidate
/// diverges from the stored value through timing.
pub trait CodeHasher: Send + Sync {
    /// Hash a plaintext code for storage
    fn hash(&self, code: &str) -> DomainResult<String>;

    /// Check a candidate code against a stored hash
    fn verify(&self, code: &str, hash: &str) -> DomainResult<bool>;
}

/// bcrypt-backed code hasher.
///
/// bcrypt generates a random salt per hash and re-derives the full digest
/// on verification, so comparison cost does not depend on the mismatch
/// position. The work factor keeps offline search of the 6-digit space
/// slow relative to the code lifetime.
pub struct BcryptCodeHasher {
    cost: u32,
}

impl BcryptCodeHasher {
    /// Create a hasher with the given bcrypt cost factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptCodeHasher {
    fn default() -> Self {
        Self::new(10)
    }
}

impl CodeHasher for BcryptCodeHasher {
    fn hash(&self, code: &str) -> DomainResult<String> {
        bcrypt::hash(code, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash verification code: {}", e),
        })
    }

    fn verify(&self, code: &str, hash: &str) -> DomainResult<bool> {
        bcrypt::verify(code, hash).map_err(|e| DomainError::Internal {
            message: format!("Failed to verify code hash: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // bcrypt's minimum cost keeps the unit tests fast
    fn hasher() -> BcryptCodeHasher {
        BcryptCodeHasher::new(4)
    }

    #[test]
    fn test_hash_round_trip() {
        let hasher = hasher();
        let hash = hasher.hash("123456").unwrap();

        assert_ne!(hash, "123456");
        assert!(hasher.verify("123456", &hash).unwrap());
        assert!(!hasher.verify("654321", &hash).unwrap());
    }

    #[test]
    fn test_salted_per_call() {
        let hasher = hasher();
        let first = hasher.hash("123456").unwrap();
        let second = hasher.hash("123456").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("123456", &first).unwrap());
        assert!(hasher.verify("123456", &second).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        let hasher = hasher();
        assert!(hasher.verify("123456", "not-a-bcrypt-hash").is_err());
    }
}
