//! Contact form submission lifecycle: `Idle -> Loading -> Success | Error`.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use serde::Deserialize;
use shared::{domain::ContactField, protocol::ContactMessage};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::transport::{ContactResponse, ContactTransport};

pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error — please try again or email me directly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub form: ContactMessage,
    pub status: SubmitStatus,
    /// Set only while `status` is [`SubmitStatus::Error`].
    pub error_msg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A required field was empty; nothing was sent.
    Rejected(ContactField),
    Sent,
    Failed(String),
    /// The controller was detached while the request was in flight.
    Discarded,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Drives one contact form against a [`ContactTransport`].
///
/// State is kept in a `watch` channel: reads and field edits are synchronous,
/// and renderers can [`subscribe`](Self::subscribe) to every transition.
pub struct ContactFormController<T: ContactTransport> {
    transport: Arc<T>,
    state: watch::Sender<FormState>,
    generation: AtomicU64,
}

impl<T: ContactTransport> ContactFormController<T> {
    pub fn new(transport: T) -> Self {
        Self::with_shared_transport(Arc::new(transport))
    }

    pub fn with_shared_transport(transport: Arc<T>) -> Self {
        let (state, _) = watch::channel(FormState::default());
        Self {
            transport,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> SubmitStatus {
        self.state.borrow().status
    }

    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    /// Edits one field. Editing after a finished submission starts over.
    pub fn set_field(&self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|state| {
            *state.form.field_mut(field) = value;
            if matches!(state.status, SubmitStatus::Success | SubmitStatus::Error) {
                state.status = SubmitStatus::Idle;
                state.error_msg = None;
            }
        });
    }

    pub fn set_form(&self, form: ContactMessage) {
        for field in ContactField::ALL {
            self.set_field(field, form.field(field));
        }
    }

    /// "Send another": back to idle, fields untouched.
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            state.status = SubmitStatus::Idle;
            state.error_msg = None;
        });
    }

    /// Disowns every in-flight submission. Their results are dropped when
    /// they arrive instead of being applied to this form.
    pub fn detach(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let form = self.state.borrow().form.clone();
        if let Some(field) = form.missing_required() {
            debug!(%field, "contact submit blocked; required field empty");
            return SubmitOutcome::Rejected(field);
        }

        let generation = self.generation.load(Ordering::SeqCst);
        self.state.send_modify(|state| {
            state.status = SubmitStatus::Loading;
            state.error_msg = None;
        });

        let result = self.transport.post_contact(&form).await;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("contact form detached before the response arrived; discarding");
            return SubmitOutcome::Discarded;
        }

        match result {
            Ok(response) if response.is_success() => {
                info!(status = response.status, "contact message sent");
                self.state.send_modify(|state| {
                    state.status = SubmitStatus::Success;
                    state.error_msg = None;
                    state.form = ContactMessage::default();
                });
                SubmitOutcome::Sent
            }
            Ok(response) => {
                let message = error_detail(&response);
                warn!(status = response.status, detail = %message, "contact message rejected");
                self.fail(message)
            }
            Err(error) => {
                warn!(%error, "contact request failed");
                self.fail(NETWORK_ERROR_MESSAGE.to_string())
            }
        }
    }

    fn fail(&self, message: String) -> SubmitOutcome {
        self.state.send_modify(|state| {
            state.status = SubmitStatus::Error;
            state.error_msg = Some(message.clone());
        });
        SubmitOutcome::Failed(message)
    }
}

fn error_detail(response: &ContactResponse) -> String {
    serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| match body.detail {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => Some(detail),
            _ => None,
        })
        .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
#[path = "tests/contact_form_tests.rs"]
mod tests;
