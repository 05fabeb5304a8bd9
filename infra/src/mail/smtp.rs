//! SMTP mailer backed by lettre

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};
use uuid::Uuid;

use nh_core::services::verification::MailerTrait;
use nh_shared::config::MailConfig;
use nh_shared::types::Language;
use nh_shared::utils::email::mask_email;

use crate::InfrastructureError;

/// Mailer delivering verification codes through an SMTP relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Create a mailer from SMTP configuration
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| {
                InfrastructureError::Config(format!("Invalid SMTP relay host: {}", e))
            })?
            .port(config.smtp_port);

        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        let from = config.from_address.parse().map_err(|e| {
            InfrastructureError::Config(format!("Invalid sender address: {}", e))
        })?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

/// Localized subject and body for the verification email
fn message_parts(code: &str, locale: Language) -> (String, String) {
    match locale {
        Language::English => (
            "Your NestHaven verification code".to_string(),
            format!(
                "Your verification code is {}.\n\n\
                 Enter it in the app within 10 minutes to verify your email \
                 address. If you did not request this code, you can ignore \
                 this message.",
                code
            ),
        ),
        Language::Chinese => (
            "您的 NestHaven 验证码".to_string(),
            format!(
                "您的验证码是 {}。\n\n\
                 请在 10 分钟内在应用中输入以验证您的邮箱地址。\
                 如果您没有请求此验证码，请忽略本邮件。",
                code
            ),
        ),
    }
}

#[async_trait]
impl MailerTrait for SmtpMailer {
    async fn send_verification_code(
        &self,
        email: &str,
        code: &str,
        locale: Language,
    ) -> Result<String, String> {
        let to: Mailbox = email
            .parse()
            .map_err(|e| format!("Invalid recipient address: {}", e))?;

        let (subject, body) = message_parts(code, locale);
        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| format!("Failed to build message: {}", e))?;

        self.transport.send(message).await.map_err(|e| {
            error!(
                email = %mask_email(email),
                error = %e,
                "SMTP delivery failed"
            );
            format!("SMTP delivery failed: {}", e)
        })?;

        let message_id = format!("smtp-{}", Uuid::new_v4());
        info!(
            target: "mail_service",
            provider = "smtp",
            email = %mask_email(email),
            message_id = %message_id,
            locale = %locale,
            "Verification email sent"
        );

        Ok(message_id)
    }
}
