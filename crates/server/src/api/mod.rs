use std::sync::Arc;

use chrono::Utc;
use shared::{
    domain::ReferenceId,
    error::ApiError,
    protocol::{ContactAccepted, ContactMessage},
};
use tracing::error;

use crate::mailer::{Mailer, OutgoingEmail};

pub const REQUIRED_FIELDS_DETAIL: &str = "Name and message are required.";
pub const INVALID_EMAIL_DETAIL: &str = "value is not a valid email address";
pub const SEND_FAILED_DETAIL: &str =
    "Failed to send email. Please try again or contact me directly.";
pub const ACCEPTED_MESSAGE: &str =
    "Your message has been sent. I will get back to you within 24 hours.";
pub const DEFAULT_SUBJECT: &str = "New Enquiry";

const MAX_EMAIL_BYTES: usize = 254;

#[derive(Clone)]
pub struct ApiContext {
    pub mailer: Arc<dyn Mailer>,
    pub owner_email: String,
}

pub async fn submit_contact(
    ctx: &ApiContext,
    msg: ContactMessage,
) -> Result<ContactAccepted, ApiError> {
    // Address shape is checked before content.
    if !is_plausible_email(&msg.email) {
        return Err(ApiError::validation(INVALID_EMAIL_DETAIL));
    }
    let name = msg.name.trim();
    let body = msg.message.trim();
    if name.is_empty() || body.is_empty() {
        return Err(ApiError::validation(REQUIRED_FIELDS_DETAIL));
    }

    let subject = match msg.subject.trim() {
        "" => DEFAULT_SUBJECT,
        subject => subject,
    };
    let email = OutgoingEmail {
        reference: ReferenceId::new(),
        received_at: Utc::now(),
        from_name: name.to_string(),
        reply_to: msg.email.clone(),
        to: ctx.owner_email.clone(),
        subject: subject.to_string(),
        body: body.to_string(),
    };

    ctx.mailer.send(&email).await.map_err(|err| {
        error!(reference = %email.reference, error = %err, "failed to deliver contact message");
        ApiError::internal(SEND_FAILED_DETAIL)
    })?;

    Ok(ContactAccepted {
        success: true,
        message: ACCEPTED_MESSAGE.to_string(),
        reference: email.reference,
    })
}

/// Shape check only: one `@`, a non-empty local part and a dotted domain.
pub fn is_plausible_email(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_BYTES || email.chars().any(char::is_whitespace)
    {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
