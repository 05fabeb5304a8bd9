//! Authentication and email verification routes

pub mod register;
pub mod send_otp;
pub mod verify_otp;

use std::sync::Arc;

use nh_core::repositories::{UserRepository, VerificationRepository};
use nh_core::services::auth::AuthService;
use nh_core::services::verification::CodeHasher;

/// Application state that holds shared services
pub struct AppState<V, U, H>
where
    V: VerificationRepository,
    U: UserRepository,
    H: CodeHasher,
{
    pub auth_service: Arc<AuthService<V, U, H>>,
}
