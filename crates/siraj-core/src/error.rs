//! Error types for the SIRAJ client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the SIRAJ client crates.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Every variant is terminal
/// for the operation that raised it; no error is retried automatically.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum SirajError {
    /// Transport failed to open or dropped unexpectedly
    #[error("Connection error: {0}")]
    Connection(String),

    /// An outbound request was attempted while no connection was open
    #[error("Send error: {0}")]
    Send(String),

    /// An inbound message could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// An explicit `error` event from the council backend
    #[error("Council error: {0}")]
    Council(String),

    /// A one-shot request failed (non-2xx status or transport failure)
    #[error("Request error: {message}")]
    Request {
        status: Option<u16>,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SirajError {
    /// Creates a Connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a Send error
    pub fn send(message: impl Into<String>) -> Self {
        Self::Send(message.into())
    }

    /// Creates a Parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a Council error from a server-signaled message
    pub fn council(message: impl Into<String>) -> Self {
        Self::Council(message.into())
    }

    /// Creates a Request error with an optional HTTP status
    pub fn request(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Request {
            status,
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Connection error
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Check if this is a Parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    /// Check if this is a server-signaled Council error
    pub fn is_council(&self) -> bool {
        matches!(self, Self::Council(_))
    }

    /// Check if this is a Request error
    pub fn is_request(&self) -> bool {
        matches!(self, Self::Request { .. })
    }

    /// Returns the HTTP status code for Request errors, if the server
    /// responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SirajError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for SirajError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A type alias for `Result<T, SirajError>`.
pub type Result<T> = std::result::Result<T, SirajError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_error_carries_status() {
        let err = SirajError::request(Some(503), "backend unavailable");
        assert!(err.is_request());
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "Request error: backend unavailable");
    }

    #[test]
    fn transport_failure_has_no_status() {
        let err = SirajError::request(None, "connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn json_error_maps_to_parse() {
        let err: SirajError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(err.is_parse());
    }
}
