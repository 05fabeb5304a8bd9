//! Configuration for the authentication service

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt cost factor for password hashing
    pub password_hash_cost: u32,
    /// Whether new registrations are accepted
    pub registration_enabled: bool,
    /// Minimum accepted password length
    pub min_password_length: usize,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            password_hash_cost: 10,
            registration_enabled: true,
            min_password_length: 8,
        }
    }
}
