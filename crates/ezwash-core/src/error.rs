//! Structured error handling shared across the workspace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error as ThisError;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fallback message used when a server error body carries nothing usable.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Categories of errors that can occur in client operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Input validation failed.
    InvalidInput,
    /// Network-related error occurred.
    NetworkError,
    /// Authentication failed.
    Authentication,
    /// Authorization failed.
    Authorization,
    /// Resource not found.
    NotFound,
    /// Timeout occurred.
    Timeout,
    /// Serialization/deserialization error.
    Serialization,
    /// Configuration error.
    Configuration,
    /// Internal client error.
    InternalError,
    /// Remote service error.
    ExternalError,
    /// Unknown error occurred.
    #[default]
    Unknown,
}

impl ErrorKind {
    /// Classifies an HTTP status code into an error kind.
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Authentication,
            403 => Self::Authorization,
            404 => Self::NotFound,
            400 | 409 | 422 => Self::InvalidInput,
            408 | 504 => Self::Timeout,
            500..=599 => Self::ExternalError,
            _ => Self::Unknown,
        }
    }
}

/// Structured error type with classification and request context.
///
/// API failures carry the HTTP status code and the parsed [`ErrorBody`] so
/// callers can branch on status (e.g. treat a 404 on delete as "already
/// gone") without re-parsing anything.
#[must_use]
#[derive(Debug, ThisError)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<String>,
    /// HTTP status code for API errors.
    pub status: Option<u16>,
    /// Parsed server error body, when one was received.
    pub body: Option<ErrorBody>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            status: None,
            body: None,
            source: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self::new(kind).with_source(source)
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches the HTTP status code.
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Attaches the parsed server error body.
    pub fn with_body(mut self, body: ErrorBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Creates a new invalid input error.
    pub fn invalid_input() -> Self {
        Self::new(ErrorKind::InvalidInput)
    }

    /// Creates a new network error.
    pub fn network_error() -> Self {
        Self::new(ErrorKind::NetworkError)
    }

    /// Creates a new authentication error.
    pub fn authentication() -> Self {
        Self::new(ErrorKind::Authentication)
    }

    /// Creates a new authorization error.
    pub fn authorization() -> Self {
        Self::new(ErrorKind::Authorization)
    }

    /// Creates a new not found error.
    pub fn not_found() -> Self {
        Self::new(ErrorKind::NotFound)
    }

    /// Creates a new timeout error.
    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    /// Creates a new serialization error.
    pub fn serialization() -> Self {
        Self::new(ErrorKind::Serialization)
    }

    /// Creates a new configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Creates a new internal error.
    pub fn internal_error() -> Self {
        Self::new(ErrorKind::InternalError)
    }

    /// Creates a new external error.
    pub fn external_error() -> Self {
        Self::new(ErrorKind::ExternalError)
    }

    /// Creates a new unknown error.
    pub fn unknown() -> Self {
        Self::new(ErrorKind::Unknown)
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the HTTP status code, if this was an API error.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Returns true if the server rejected the credentials (HTTP 401).
    pub fn is_authentication(&self) -> bool {
        self.kind == ErrorKind::Authentication
    }
}

/// A server error payload, decoded into its known shapes.
///
/// The backend answers failures either with a single `detail` string, a
/// `message` string, or a per-field validation map. Everything else is kept
/// raw under [`ErrorBody::Unknown`]. Variant order matters: serde tries
/// them top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorBody {
    /// Single human-readable reason, e.g. `{"detail": "Invalid credentials"}`.
    Detail { detail: String },
    /// Alternative single-message shape, e.g. `{"message": "..."}`.
    Message { message: String },
    /// Per-field validation errors, e.g. `{"username": ["Username already exists."]}`.
    Fields(BTreeMap<String, FieldErrors>),
    /// Anything that matched none of the known shapes.
    Unknown(serde_json::Value),
}

impl ErrorBody {
    /// Parses raw response bytes, falling back to [`ErrorBody::Unknown`]
    /// when the body is not valid JSON.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or(Self::Unknown(serde_json::Value::Null))
    }

    /// Extracts a human-readable message, if the body carries one.
    ///
    /// Precedence: `detail`, then `message`, then the first validation
    /// field rendered as `"field: first error"`. Field maps are ordered,
    /// so the chosen field is deterministic.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Detail { detail } => Some(detail.clone()),
            Self::Message { message } => Some(message.clone()),
            Self::Fields(fields) => fields
                .iter()
                .next()
                .map(|(field, errors)| format!("{field}: {}", errors.first().unwrap_or_default())),
            Self::Unknown(_) => None,
        }
    }

    /// Extracts a message, falling back to [`GENERIC_ERROR_MESSAGE`].
    pub fn message_or_default(&self) -> String {
        self.message()
            .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_owned())
    }
}

/// One or many error strings attached to a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldErrors {
    /// A list of errors; the backend's usual validation shape.
    Many(Vec<String>),
    /// A single bare string.
    One(String),
}

impl FieldErrors {
    /// Returns the first error string, if any.
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::Many(errors) => errors.first().map(String::as_str),
            Self::One(error) => Some(error),
        }
    }
}
