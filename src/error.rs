use std::sync::Arc;

use reqwest::StatusCode;

use crate::response::ErrorBody;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`HeapClient`](crate::HeapClient).
#[derive(thiserror::Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// The client was configured with an empty application ID.
    #[error("Heap App ID is required")]
    MissingAppId,

    /// Invalid base URL configuration.
    #[error("invalid base_url configuration")]
    InvalidBaseUrl(#[source] url::ParseError),

    /// Heap responded with a non-success status, or the request could not be completed (network
    /// failure, timeout).
    #[error(transparent)]
    Transport(TransportError),

    /// Any other failure, e.g. the payload could not be serialized before the request was sent.
    #[error("unexpected error: {0}")]
    Unexpected(#[source] Arc<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Returns `true` if the error was caused by invalid client configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::MissingAppId | Error::InvalidBaseUrl(_))
    }

    /// Returns the underlying [`TransportError`], if this is one.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Error::Transport(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn unexpected(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Unexpected(Arc::new(err))
    }
}

impl From<TransportError> for Error {
    fn from(value: TransportError) -> Self {
        Error::Transport(value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(value))
    }
}

/// A failure recognized by the HTTP transport.
///
/// Either Heap answered with a non-success status (in which case [`status`](Self::status) is set
/// and [`body`](Self::body) holds whatever Heap sent back), or the request never completed and
/// [`source`](std::error::Error::source) holds the underlying [`reqwest::Error`].
#[derive(thiserror::Error, Debug, Clone)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    status: Option<StatusCode>,
    body: Option<ErrorBody>,
    // reqwest::Error is not clonable, so we're wrapping it in an Arc.
    source: Option<Arc<reqwest::Error>>,
}

impl TransportError {
    pub(crate) fn from_status(status: StatusCode, body: Option<ErrorBody>) -> Self {
        TransportError {
            message: format!("request failed with status code {}", status.as_u16()),
            status: Some(status),
            body,
            source: None,
        }
    }

    /// Human-readable description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// HTTP status returned by Heap, if a response was received.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// Response body returned alongside the error status, if any.
    pub fn body(&self) -> Option<&ErrorBody> {
        self.body.as_ref()
    }

    /// Returns `true` if the request did not complete within the configured timeout.
    pub fn is_timeout(&self) -> bool {
        self.source.as_ref().is_some_and(|err| err.is_timeout())
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        let value = value.without_url();
        TransportError {
            message: value.to_string(),
            status: value.status(),
            body: None,
            source: Some(Arc::new(value)),
        }
    }
}
