use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::dto::auth::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::{handle_domain_error_with_lang, request_language, validation_failure};

use nh_core::repositories::{UserRepository, VerificationRepository};
use nh_core::services::verification::CodeHasher;
use nh_shared::types::Language;
use nh_shared::utils::email::mask_email;

use super::AppState;

/// Handler for POST /auth/verify-otp
///
/// Checks a submitted code and marks the account's email verified.
/// The code must be exactly 6 ASCII digits; anything else is rejected
/// here as a validation error before reaching the service.
///
/// # Responses
/// - 200 OK: email verified
/// - 400 Bad Request: wrong code (`attempts_left`) or expired/exhausted
///   (`requires_new_otp: true`)
/// - 404 Not Found: no pending verification for this email
pub async fn verify_otp<V, U, H>(
    req: HttpRequest,
    state: web::Data<AppState<V, U, H>>,
    request: web::Json<VerifyOtpRequest>,
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

    if !request.otp.chars().all(|c| c.is_ascii_digit()) {
        return validation_failure(
            lang,
            Some(serde_json::json!("otp must contain only digits")),
        );
    }

    log::info!(
        "Processing verify-otp request for email: {}",
        mask_email(&request.email)
    );

    match state
        .auth_service
        .verify_email(&request.email, &request.otp)
        .await
    {
        Ok(()) => {
            let message = match lang {
                Language::English => "Email address verified successfully",
                Language::Chinese => "邮箱地址验证成功",
            };
            HttpResponse::Ok().json(VerifyOtpResponse {
                verified: true,
                message: message.to_string(),
            })
        }
        Err(error) => handle_domain_error_with_lang(error, lang),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(otp: &str) -> VerifyOtpRequest {
        VerifyOtpRequest {
            email: "user@example.com".to_string(),
            otp: otp.to_string(),
        }
    }

    #[test]
    fn test_otp_length_is_validated() {
        assert!(request("123456").validate().is_ok());
        assert!(request("12345").validate().is_err());
        assert!(request("1234567").validate().is_err());
    }

    #[test]
    fn test_non_digit_otp_passes_length_check_only() {
        // Length validation alone accepts letters; the handler's digit
        // check is what rejects them
        let req = request("12a456");
        assert!(req.validate().is_ok());
        assert!(!req.otp.chars().all(|c| c.is_ascii_digit()));
    }
}
