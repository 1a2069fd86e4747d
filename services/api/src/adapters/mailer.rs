//! services/api/src/adapters/mailer.rs
//!
//! Outbound-mail adapters implementing the `Mailer` port. Contact
//! submissions are persisted first; relaying them by email is strictly best
//! effort, so both adapters swallow their failures after logging them.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{error, info};

use agendas_core::domain::Message;
use agendas_core::ports::Mailer;

use crate::config::SmtpConfig;
use crate::error::ApiError;

/// Relays contact messages to the configured inbox over SMTP (STARTTLS).
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    inbox: String,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, ApiError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| ApiError::Internal(format!("Invalid SMTP relay: {}", e)))?
            .port(config.port)
            .credentials(Credentials::new(config.user.clone(), config.pass.clone()))
            .build();

        Ok(Self {
            transport,
            inbox: config.user.clone(),
        })
    }

    fn build_email(&self, message: &Message) -> Result<lettre::Message, String> {
        let inbox: Mailbox = self.inbox.parse().map_err(|e| format!("{}", e))?;

        let mut builder = lettre::Message::builder()
            .from(inbox.clone())
            .to(inbox)
            .subject(format!("[Contact Riziky-Agendas] {}", message.sujet));

        // The visitor's address goes into Reply-To so the owner can answer
        // directly; an unparseable address is simply omitted.
        if let Ok(reply_to) = message.email.parse::<Mailbox>() {
            builder = builder.reply_to(reply_to);
        }

        builder
            .body(format!(
                "Message de: {} ({})\n\n{}",
                message.nom, message.email, message.message
            ))
            .map_err(|e| format!("{}", e))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn attempt_notify(&self, message: &Message) {
        let email = match self.build_email(message) {
            Ok(email) => email,
            Err(e) => {
                error!("Failed to build contact email: {}", e);
                return;
            }
        };

        match self.transport.send(email).await {
            Ok(_) => info!("Contact message {} relayed by email", message.id),
            Err(e) => error!("Failed to relay contact message {}: {}", message.id, e),
        }
    }
}

/// Used when the SMTP settings are absent: the message stays stored, nothing
/// is sent.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn attempt_notify(&self, message: &Message) {
        info!(
            "SMTP configuration missing, contact message {} stored without email relay",
            message.id
        );
    }
}
