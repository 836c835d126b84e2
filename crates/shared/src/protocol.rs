use serde::{Deserialize, Serialize};

use crate::domain::{ContactField, ReferenceId};

pub const CONTACT_ROUTE: &str = "/api/contact";
pub const HEALTH_ROUTE: &str = "/api/health";

/// JSON body of `POST /api/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }

    /// First required field that is empty, in form order.
    pub fn missing_required(&self) -> Option<ContactField> {
        ContactField::ALL
            .into_iter()
            .filter(|field| field.is_required())
            .find(|field| self.field(*field).is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactAccepted {
    pub success: bool,
    pub message: String,
    pub reference: ReferenceId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}
