//! Error types for the gadget catalog.
//!
//! This module defines the crate-wide error type [`CatalogError`], the
//! [`Result`] alias used throughout the crate, and the normalized
//! [`OperationError`] shape that the coordinator hands to the store. All
//! errors are implemented using the `thiserror` crate.
//!
//! Remote failures fall into three kinds ([`ErrorKind`]): transport problems,
//! non-2xx server replies, and payloads that do not match the gadget schema.
//! The store never inspects the kind; it only records the message.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for gadget catalog operations.
///
/// # Examples
///
/// ```
/// use gadget_catalog::CatalogError;
///
/// let err = CatalogError::Server { status: 404, message: "Request failed with status code 404".into() };
/// assert_eq!(err.to_string(), "Request failed with status code 404");
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never produced a response.
    ///
    /// Covers unreachable hosts, refused connections and timeouts.
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Server {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Human-readable failure description.
        message: String,
    },

    /// The response payload did not match the expected gadget schema.
    #[error("Malformed payload: {0}")]
    Shape(String),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Shape(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Server {
                status: status.as_u16(),
                message: format!("Request failed with status code {}", status.as_u16()),
            }
        } else if err.is_timeout() {
            Self::Transport(format!("Request timed out: {err}"))
        } else {
            Self::Transport(format!("Network Error: {err}"))
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Shape(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A specialized `Result` type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Classification of a failed remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Network unreachable, connection refused, timeout.
    Transport,
    /// Non-2xx response from the backend.
    Server,
    /// Response body missing required fields or carrying invalid values.
    Shape,
}

/// Normalized failure handed to the store and returned to awaiting callers.
///
/// Built from a [`CatalogError`] at the coordinator boundary, so every
/// failure reaching the store has the same `{kind, message}` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct OperationError {
    /// Which failure family produced the error.
    pub kind: ErrorKind,
    /// Message stored as the store's last error.
    pub message: String,
    /// HTTP status for server failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl OperationError {
    /// Creates a transport failure with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Transport,
            message: message.into(),
            status: None,
        }
    }

    /// Creates a server failure for the given status code.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Server,
            message: message.into(),
            status: Some(status),
        }
    }

    /// Creates a payload-shape failure.
    pub fn shape(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Shape,
            message: message.into(),
            status: None,
        }
    }
}

impl From<&CatalogError> for OperationError {
    fn from(err: &CatalogError) -> Self {
        match err {
            CatalogError::Server { status, message } => Self::server(*status, message.clone()),
            CatalogError::Shape(_) => Self::shape(err.to_string()),
            // Config and I/O problems only surface here when the transport
            // itself could not be set up.
            CatalogError::Transport(_) | CatalogError::Config(_) | CatalogError::Io(_) => {
                Self::transport(err.to_string())
            }
        }
    }
}

impl From<CatalogError> for OperationError {
    fn from(err: CatalogError) -> Self {
        Self::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_keeps_status_and_message() {
        let err = CatalogError::Server {
            status: 500,
            message: "Request failed with status code 500".to_string(),
        };
        let normalized = OperationError::from(&err);
        assert_eq!(normalized.kind, ErrorKind::Server);
        assert_eq!(normalized.status, Some(500));
        assert_eq!(normalized.message, "Request failed with status code 500");
    }

    #[test]
    fn shape_error_is_prefixed() {
        let normalized = OperationError::from(CatalogError::Shape("missing field `specs`".into()));
        assert_eq!(normalized.kind, ErrorKind::Shape);
        assert_eq!(normalized.message, "Malformed payload: missing field `specs`");
        assert_eq!(normalized.status, None);
    }

    #[test]
    fn io_error_normalizes_to_transport() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let normalized = OperationError::from(CatalogError::from(io));
        assert_eq!(normalized.kind, ErrorKind::Transport);
        assert!(normalized.message.contains("refused"));
    }
}
