use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypingError {
    #[error("typing effect needs at least one role")]
    NoRoles,
}

/// The request never produced an HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid server url '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("reading response body from {url} failed: {source}")]
    Body { url: String, source: reqwest::Error },
    #[error("{0}")]
    Other(String),
}
