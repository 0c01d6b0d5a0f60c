use lettre::address::AddressError;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::fmt;
use thiserror::Error;

use crate::config::Config;
use crate::models::Briefing;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("{0} not found. Set it as an environment variable or in ~/.config/commute-briefing/.env")]
    MissingCredentials(&'static str),

    #[error("Invalid email address {address:?}: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: AddressError,
    },

    #[error("Failed to build email: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Split a comma-separated recipient list, falling back to the sender
pub fn parse_recipients(raw: Option<&str>, sender: &str) -> Vec<String> {
    let recipients: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(str::to_string)
        .collect();

    if recipients.is_empty() {
        vec![sender.to_string()]
    } else {
        recipients
    }
}

fn mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse::<Mailbox>()
        .map_err(|source| NotifyError::InvalidAddress {
            address: address.to_string(),
            source,
        })
}

/// Sends the briefing as a plain-text email over implicit TLS
pub struct EmailNotifier {
    sender: String,
    password: String,
    recipients: Vec<String>,
    relay: String,
}

impl fmt::Debug for EmailNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailNotifier")
            .field("sender", &self.sender)
            .field("password", &"<redacted>")
            .field("recipients", &self.recipients)
            .field("relay", &self.relay)
            .finish()
    }
}

impl EmailNotifier {
    /// Fails if the mail credentials are missing. `to_override` replaces
    /// `EMAIL_TO` when given.
    pub fn from_config(config: &Config, to_override: Option<&str>) -> Result<Self, NotifyError> {
        let sender = config
            .email_user
            .clone()
            .ok_or(NotifyError::MissingCredentials("EMAIL_USER"))?;
        let password = config
            .email_password
            .clone()
            .ok_or(NotifyError::MissingCredentials("EMAIL_PASSWORD"))?;

        let raw_to = to_override.or(config.email_to.as_deref());
        let recipients = parse_recipients(raw_to, &sender);

        Ok(Self {
            sender,
            password,
            recipients,
            relay: config.endpoints.smtp_relay.clone(),
        })
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    pub fn build_message(&self, subject: &str, body: &str) -> Result<Message, NotifyError> {
        let mut builder = Message::builder()
            .from(mailbox(&self.sender)?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN);

        for recipient in &self.recipients {
            builder = builder.to(mailbox(recipient)?);
        }

        Ok(builder.body(body.to_string())?)
    }

    pub async fn send(&self, briefing: &Briefing) -> Result<(), NotifyError> {
        let message = self.build_message(&briefing.subject, &briefing.body)?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.relay)?
            .credentials(Credentials::new(self.sender.clone(), self.password.clone()))
            .build();

        mailer.send(message).await?;
        tracing::info!(recipients = self.recipients.len(), "Briefing email sent");

        Ok(())
    }
}
