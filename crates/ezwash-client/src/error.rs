//! Internal error types for ezwash-client.

use ezwash_core::{ErrorBody, ErrorKind};
use thiserror::Error as ThisError;

/// Result type alias for ezwash-client operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type for ezwash-client operations.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The request could not complete (connection refused, DNS, timeout).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Best-effort human-readable message extracted from the body.
        message: String,
        /// The decoded error body.
        body: ErrorBody,
    },
    /// A success body could not be decoded into the expected type.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// The client configuration is unusable.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Returns the HTTP status code for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the server rejected the bearer token (HTTP 401).
    pub fn is_auth_rejected(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<Error> for ezwash_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Transport(e) => {
                if e.is_timeout() {
                    ezwash_core::Error::timeout()
                        .with_message(e.to_string())
                        .with_source(e)
                } else if e.is_connect() {
                    ezwash_core::Error::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else {
                    ezwash_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Api {
                status,
                message,
                body,
            } => ezwash_core::Error::new(ErrorKind::from_status(status))
                .with_message(message)
                .with_status(status)
                .with_body(body),
            Error::Decode(e) => ezwash_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Configuration(message) => {
                ezwash_core::Error::configuration().with_message(message)
            }
        }
    }
}
