//! Client error types.

use thiserror::Error;

/// Client error type.
///
/// Every operation surfaces one of three kinds of failure: validation
/// (rejected before any I/O), transport (the HTTP exchange did not complete)
/// or decoding (the response body did not match the expected shape).
#[derive(Debug, Error)]
pub enum Error {
    /// A required identifier or payload was empty.
    #[error("{0}")]
    Validation(String),

    /// HTTP request could not be sent or its body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request body serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Response body was not valid JSON for the expected type.
    #[error("could not decode response (HTTP {status}): {source}")]
    Decode {
        /// HTTP status code of the exchange.
        status: u16,
        /// Underlying decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Check if this error was raised before any request was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this is a transport (connection or read) failure.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Check if the response body could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// HTTP status of the exchange, when one completed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Decode { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;
