//! Domain error to HTTP response mapping
//!
//! Every business rejection becomes a distinct response shape so clients
//! can decide whether to wait, resend, or re-enter a code. Messages are
//! localized from the Accept-Language header; error codes and details
//! stay stable across languages.

use actix_web::http::{header, StatusCode};
use actix_web::{HttpRequest, HttpResponse};
use serde_json::json;

use nh_core::errors::{AuthError, DomainError, VerificationError};
use nh_shared::types::Language;

use crate::dto::ErrorResponse;

/// Detect the language preference from the request headers
pub fn request_language(req: &HttpRequest) -> Language {
    req.headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or_default()
}

fn localized(lang: Language, en: &str, zh: &str) -> String {
    match lang {
        Language::English => en.to_string(),
        Language::Chinese => zh.to_string(),
    }
}

/// Build the standard 400 response for malformed request data
pub fn validation_failure(lang: Language, detail: Option<serde_json::Value>) -> HttpResponse {
    let mut response = ErrorResponse::new(
        "validation_error",
        localized(lang, "Invalid request data", "请求数据无效"),
    );
    if let Some(detail) = detail {
        response = response.with_detail("validation_errors", detail);
    }
    response.to_response(StatusCode::BAD_REQUEST)
}

/// Handle domain errors with language support
pub fn handle_domain_error_with_lang(error: DomainError, lang: Language) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::UserNotFound => HttpResponse::NotFound().json(ErrorResponse::new(
                "user_not_found",
                localized(lang, "No account exists for this email", "该邮箱没有对应的账户"),
            )),
            AuthError::EmailAlreadyRegistered => {
                HttpResponse::Conflict().json(ErrorResponse::new(
                    "email_already_registered",
                    localized(
                        lang,
                        "This email address is already registered",
                        "该邮箱地址已被注册",
                    ),
                ))
            }
            AuthError::RegistrationDisabled => {
                HttpResponse::Forbidden().json(ErrorResponse::new(
                    "registration_disabled",
                    localized(
                        lang,
                        "Registration is currently disabled",
                        "注册功能暂时关闭",
                    ),
                ))
            }
        },
        DomainError::Verification(verification_error) => {
            handle_verification_error(verification_error, lang)
        }
        DomainError::ValidationErr(validation_error) => {
            log::warn!("Validation rejected: {}", validation_error);
            validation_failure(lang, Some(json!(validation_error.to_string())))
        }
        DomainError::Validation { message } => {
            log::warn!("Validation rejected: {}", message);
            validation_failure(lang, Some(json!(message)))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(
            ErrorResponse::new(
                "not_found",
                localized(
                    lang,
                    &format!("Resource not found: {}", resource),
                    &format!("资源不存在：{}", resource),
                ),
            ),
        ),
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                localized(lang, "An internal error occurred", "发生内部错误"),
            ))
        }
    }
}

fn handle_verification_error(error: VerificationError, lang: Language) -> HttpResponse {
    match error {
        VerificationError::AlreadyVerified => HttpResponse::Conflict().json(
            ErrorResponse::new(
                "email_already_verified",
                localized(
                    lang,
                    "This email address is already verified",
                    "该邮箱地址已完成验证",
                ),
            ),
        ),
        VerificationError::CooldownActive {
            retry_after_seconds,
        } => HttpResponse::TooManyRequests().json(
            ErrorResponse::new(
                "cooldown_active",
                localized(
                    lang,
                    &format!(
                        "Please wait {} seconds before requesting a new code",
                        retry_after_seconds
                    ),
                    &format!("请等待 {} 秒后再请求新的验证码", retry_after_seconds),
                ),
            )
            .with_detail("retry_after", json!(retry_after_seconds)),
        ),
        VerificationError::ResendLimitExceeded {
            retry_after_seconds,
        } => HttpResponse::TooManyRequests().json(
            ErrorResponse::new(
                "resend_limit_exceeded",
                localized(
                    lang,
                    "Too many codes requested. Please try again later",
                    "验证码请求次数过多，请稍后再试",
                ),
            )
            .with_detail("retry_after", json!(retry_after_seconds)),
        ),
        VerificationError::CodeExpired => HttpResponse::BadRequest().json(
            ErrorResponse::new(
                "otp_expired",
                localized(
                    lang,
                    "Verification code has expired. Please request a new one",
                    "验证码已过期，请重新获取",
                ),
            )
            .with_detail("requires_new_otp", json!(true)),
        ),
        VerificationError::AttemptsExhausted => HttpResponse::BadRequest().json(
            ErrorResponse::new(
                "otp_attempts_exhausted",
                localized(
                    lang,
                    "Too many incorrect attempts. Please request a new code",
                    "错误次数过多，请重新获取验证码",
                ),
            )
            .with_detail("requires_new_otp", json!(true)),
        ),
        VerificationError::CodeMismatch { attempts_left } => HttpResponse::BadRequest().json(
            ErrorResponse::new(
                "otp_mismatch",
                localized(
                    lang,
                    &format!(
                        "Incorrect verification code. {} attempt(s) remaining",
                        attempts_left
                    ),
                    &format!("验证码错误，还可尝试 {} 次", attempts_left),
                ),
            )
            .with_detail("attempts_left", json!(attempts_left)),
        ),
        VerificationError::NoPendingVerification => HttpResponse::NotFound().json(
            ErrorResponse::new(
                "no_pending_verification",
                localized(
                    lang,
                    "No pending verification for this email. Please request a new code",
                    "该邮箱没有待验证的验证码，请重新获取",
                ),
            ),
        ),
        VerificationError::DeliveryFailed => HttpResponse::ServiceUnavailable().json(
            ErrorResponse::new(
                "mail_delivery_failed",
                localized(
                    lang,
                    "Verification email could not be delivered. Please try again later",
                    "验证邮件发送失败，请稍后重试",
                ),
            ),
        ),
    }
}
