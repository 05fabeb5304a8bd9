use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::auth::{RegisterRequest, RegisterResponse};
use crate::handlers::{handle_domain_error_with_lang, request_language, validation_failure};

use nh_core::repositories::{UserRepository, VerificationRepository};
use nh_core::services::auth::RegisterData;
use nh_core::services::verification::CodeHasher;
use nh_shared::utils::email::mask_email;

use super::AppState;

/// Handler for POST /auth/register
///
/// Creates an unverified account and triggers the first verification code.
/// A delivery failure does not fail the registration; the response reports
/// `otp_sent: false` and the client can resend after the cooldown.
///
/// # Responses
/// - 201 Created: account created, verification pending
/// - 400 Bad Request: invalid request data
/// - 409 Conflict: email already registered
pub async fn register<V, U, H>(
    req: HttpRequest,
    state: web::Data<AppState<V, U, H>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    V: VerificationRepository + 'static,
    U: UserRepository + 'static,
    H: CodeHasher + 'static,
{
    let lang = request_language(&req);

    if let Err(errors) = request.validate() {
        log::warn!("Validation failed for register request: {}", errors);
        return validation_failure(lang, Some(serde_json::json!(errors)));
    }

    log::info!(
        "Processing registration for email: {}",
        mask_email(&request.email)
    );

    let data = RegisterData {
        name: request.name.clone(),
        email: request.email.clone(),
        password: request.password.clone(),
        phone: request.phone.clone(),
    };

    match state.auth_service.register(data, lang).await {
        Ok(result) => HttpResponse::Created().json(RegisterResponse {
            user_id: result.user_id,
            requires_email_verification: result.requires_email_verification,
            otp_sent: result.otp_sent,
            expires_in: result.expires_in,
            dev_otp: result.dev_otp,
        }),
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}
