//! Delivery of accepted contact messages to the site owner.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::domain::ReferenceId;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub reference: ReferenceId,
    pub received_at: DateTime<Utc>,
    pub from_name: String,
    pub reply_to: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> anyhow::Result<()>;
}

/// Records each submission in the service log instead of relaying it over
/// SMTP.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &OutgoingEmail) -> anyhow::Result<()> {
        info!(
            reference = %email.reference,
            received_at = %email.received_at.to_rfc3339(),
            from = %format_args!("{} <{}>", email.from_name, email.reply_to),
            to = %email.to,
            subject = %email.subject,
            body = %email.body,
            "contact form submission"
        );
        Ok(())
    }
}
