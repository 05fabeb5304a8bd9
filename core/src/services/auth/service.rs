//! Main authentication service implementation

use std::sync::Arc;

use nh_shared::types::Language;
use nh_shared::utils::email::{is_valid_email, mask_email, normalize_email};

use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::domain::entities::user::User;
use crate::repositories::{UserRepository, VerificationRepository};
use crate::services::verification::{CodeHasher, IssueCodeResult, VerificationService};

use super::config::AuthServiceConfig;
use super::types::{RegisterData, RegistrationResult};

/// Authentication service composing registration with code issuance.
///
/// The API layer talks to this facade; it delegates the verification
/// state machine to [`VerificationService`].
pub struct AuthService<V, U, H>
where
    V: VerificationRepository,
    U: UserRepository,
    H: CodeHasher,
{
    /// User repository for account persistence
    user_repository: Arc<U>,
    /// Verification service for code issuance and checking
    verification_service: Arc<VerificationService<V, U, H>>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<V, U, H> AuthService<V, U, H>
where
    V: VerificationRepository,
    U: UserRepository,
    H: CodeHasher,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<V, U, H>>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            config,
        }
    }

    /// Register a new account and trigger the first code issuance.
    ///
    /// The account is created unverified. Issuance failure (including
    /// delivery failure) does not undo the registration; the result
    /// reports `otp_sent: false` and the client may resend after the
    /// cooldown.
    pub async fn register(
        &self,
        data: RegisterData,
        locale: Language,
    ) -> DomainResult<RegistrationResult> {
        if !self.config.registration_enabled {
            return Err(AuthError::RegistrationDisabled.into());
        }

        let email = normalize_email(&data.email);
        if !is_valid_email(&email) {
            return Err(ValidationError::InvalidEmail.into());
        }
        if data.password.len() < self.config.min_password_length {
            return Err(ValidationError::InvalidLength {
                field: "password".to_string(),
                expected: self.config.min_password_length,
                actual: data.password.len(),
            }
            .into());
        }

        if self.user_repository.exists_by_email(&email).await? {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let password_hash = bcrypt::hash(&data.password, self.config.password_hash_cost)
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to hash password: {}", e),
            })?;

        let user = User::new(data.name, email.clone(), data.phone, password_hash);
        let created = self.user_repository.create(user).await?;

        tracing::info!(
            email = %mask_email(&email),
            user_id = %created.id,
            event = "user_registered",
            "Registered new account"
        );

        // First issuance; a failure here leaves a valid unverified account
        // that can request a code later.
        let (otp_sent, expires_in, dev_otp) =
            match self.verification_service.issue_code(&email, locale).await {
                Ok(issue) => (issue.otp_sent, Some(issue.expires_in), issue.dev_code),
                Err(e) => {
                    tracing::warn!(
                        email = %mask_email(&email),
                        error = %e,
                        event = "registration_otp_failed",
                        "Could not issue verification code during registration"
                    );
                    (false, None, None)
                }
            };

        Ok(RegistrationResult {
            user_id: created.id,
            requires_email_verification: true,
            otp_sent,
            expires_in,
            dev_otp,
        })
    }

    /// Issue (or re-issue) a verification code for an existing account
    pub async fn send_verification_code(
        &self,
        email: &str,
        locale: Language,
    ) -> DomainResult<IssueCodeResult> {
        self.verification_service.issue_code(email, locale).await
    }

    /// Verify a submitted code and mark the account's email verified
    pub async fn verify_email(&self, email: &str, code: &str) -> DomainResult<()> {
        self.verification_service.verify_code(email, code).await
    }
}
