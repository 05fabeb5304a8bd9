use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::auth::{SendOtpRequest, SendOtpResponse};
use crate::handlers::{handle_domain_error_with_lang, request_language, validation_failure};

use nh_core::repositories::{UserRepository, VerificationRepository};
use nh_core::services::verification::CodeHasher;
use nh_shared::utils::email::mask_email;

use super::AppState;

/// Handler for POST /auth/send-otp
///
/// Issues (or re-issues) a verification code for an unverified account.
///
/// # Responses
/// - 200 OK: code issued; `otp_sent` reports delivery
/// - 404 Not Found: unknown email
/// - 409 Conflict: email already verified
/// - 429 Too Many Requests: resend cooldown or hourly cap, with
///   `retry_after` seconds in the details
pub async fn send_otp<V, U, H>(
    req: HttpRequest,
    state: web::Data<AppState<V, U, H>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    V: VerificationRepository + 'static,
    U: UserRepository + 'static,
    H: CodeHasher + 'static,
{
    let lang = request_language(&req);

    if let Err(errors) = request.validate() {
        return validation_failure(lang, Some(serde_json::json!(errors)));
    }

    log::info!(
        "Processing send-otp request for email: {}",
        mask_email(&request.email)
    );

    match state
        .auth_service
        .send_verification_code(&request.email, lang)
        .await
    {
        Ok(result) => {
            let resend_after = (result.next_resend_at - chrono::Utc::now())
                .num_seconds()
                .max(0);
            HttpResponse::Ok().json(SendOtpResponse {
                expires_in: result.expires_in,
                resend_after,
                otp_sent: result.otp_sent,
                dev_otp: result.dev_code,
            })
        }
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}
