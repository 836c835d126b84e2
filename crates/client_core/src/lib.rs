//! Client-side state machines for the portfolio site: the hero role-cycle
//! typing animation and the contact form submission lifecycle.

pub mod contact_form;
pub mod error;
pub mod transport;
pub mod typing;

pub use contact_form::{ContactFormController, FormState, SubmitOutcome, SubmitStatus};
pub use error::{TransportError, TypingError};
pub use transport::{ContactResponse, ContactTransport, HttpContactTransport};
pub use typing::{Frame, TypingEffect, TypingTicker, TypingTimings};

