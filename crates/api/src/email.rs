//! Password-reset mail delivery via SMTP.
//!
//! Wraps the `lettre` async SMTP transport. When SMTP is not configured the
//! caller logs the reset link instead of sending it, so local development
//! works without a mail server.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(#[from] lettre::error::Error),
}

/// Sends password-reset emails over SMTP.
pub struct Mailer {
    config: SmtpConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl Mailer {
    /// Build a mailer from SMTP configuration.
    pub fn new(config: SmtpConfig) -> Result<Self, EmailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
                .port(config.port);

        if let (Some(user), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    /// Send the plain-text reset email containing the one-hour link.
    pub async fn send_reset_link(&self, to: &str, token: &str) -> Result<(), EmailError> {
        let link = format!("{}?token={token}", self.config.reset_link_base);

        let message = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(to.parse()?)
            .subject("Đặt lại mật khẩu quản trị")
            .header(ContentType::TEXT_PLAIN)
            .body(format!(
                "Bạn đã yêu cầu đặt lại mật khẩu.\n\n\
                 Nhấn vào liên kết sau trong vòng 1 giờ để đặt mật khẩu mới:\n{link}\n\n\
                 Nếu không phải bạn, hãy bỏ qua email này."
            ))?;

        self.transport.send(message).await?;
        tracing::info!(to, "Password reset email sent");
        Ok(())
    }
}
