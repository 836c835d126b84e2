use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{ContactMessage, CONTACT_ROUTE};
use tracing::debug;
use url::Url;

use crate::error::TransportError;

/// Raw outcome of a contact request that reached the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ContactResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait ContactTransport: Send + Sync {
    /// Posts one contact message. Any HTTP status is a response; only a
    /// request that never completes is an error.
    async fn post_contact(&self, message: &ContactMessage)
        -> Result<ContactResponse, TransportError>;
}

pub struct HttpContactTransport {
    http: Client,
    endpoint: Url,
}

impl HttpContactTransport {
    pub fn new(server_url: &str) -> Result<Self, TransportError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, TransportError> {
        let invalid = |source| TransportError::InvalidUrl {
            url: server_url.to_string(),
            source,
        };
        let base = Url::parse(server_url).map_err(invalid)?;
        let endpoint = base.join(CONTACT_ROUTE).map_err(invalid)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ContactTransport for HttpContactTransport {
    async fn post_contact(
        &self,
        message: &ContactMessage,
    ) -> Result<ContactResponse, TransportError> {
        let url = self.endpoint.to_string();
        let res = self
            .http
            .post(self.endpoint.clone())
            .json(message)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.clone(),
                source,
            })?;
        let status = res.status().as_u16();
        let body = res
            .bytes()
            .await
            .map_err(|source| TransportError::Body { url, source })?;
        debug!(status, bytes = body.len(), "contact request completed");
        Ok(ContactResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
