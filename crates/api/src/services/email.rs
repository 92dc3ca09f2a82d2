//! Confirmation email delivery.
//!
//! Two transports:
//! - `smtp`: STARTTLS relay with credentials, via lettre
//! - `console`: logs the message (used whenever SMTP is not fully configured)

use std::sync::Arc;

use async_trait::async_trait;
use domain::services::ConfirmationMessage;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;
use tracing::info;

use crate::config::EmailConfig;

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    BuildFailed(String),

    #[error("Failed to send email: {0}")]
    SendFailed(String),
}

/// A transport able to deliver one confirmation message.
#[async_trait]
pub trait Mailer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, message: &ConfirmationMessage) -> Result<(), EmailError>;
}

/// Logs messages instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct ConsoleMailer;

#[async_trait]
impl Mailer for ConsoleMailer {
    fn name(&self) -> &'static str {
        "console"
    }

    async fn send(&self, message: &ConfirmationMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "Email (console provider)"
        );
        Ok(())
    }
}

/// Sends through an SMTP relay using STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(config: &EmailConfig) -> Result<Self, EmailError> {
        let from: Mailbox = config
            .sender()
            .parse()
            .map_err(|_| EmailError::InvalidAddress(config.sender().to_string()))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| EmailError::BuildFailed(e.to_string()))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .timeout(Some(config.timeout()))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn send(&self, message: &ConfirmationMessage) -> Result<(), EmailError> {
        let email = build_message(self.from.clone(), message)?;
        self.transport
            .send(email)
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;
        info!(to = %message.to, "Confirmation email sent");
        Ok(())
    }
}

fn build_message(from: Mailbox, message: &ConfirmationMessage) -> Result<Message, EmailError> {
    let to: Mailbox = message
        .to
        .parse()
        .map_err(|_| EmailError::InvalidAddress(message.to.clone()))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(message.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(message.body.clone())
        .map_err(|e| EmailError::BuildFailed(e.to_string()))
}

/// Picks SMTP when host, username and password are all set, else the console.
pub fn mailer_from_config(config: &EmailConfig) -> Result<Arc<dyn Mailer>, EmailError> {
    if config.smtp_configured() {
        info!(host = %config.smtp_host, port = config.smtp_port, "Using SMTP email provider");
        Ok(Arc::new(SmtpMailer::new(config)?))
    } else {
        info!("SMTP not configured; confirmation emails will be logged");
        Ok(Arc::new(ConsoleMailer))
    }
}
