//! Error types for the console.
//!
//! This module defines the centralized error type [`ConsoleError`] and a type alias
//! [`Result`] used across the client, session and controller layers. All errors are
//! implemented with `thiserror`.
//!
//! Screen controllers never hand these errors to their caller for fetch, save or
//! delete failures. They log the detail and keep a static banner message instead.
//! The error value is still useful one layer down, where the HTTP client and the
//! session store need to tell an expired session apart from a rejected request.

use thiserror::Error;

/// The main error type for console operations.
///
/// # Examples
///
/// ```
/// use opsconsole::domain::{ConsoleError, ErrorKind};
///
/// let err = ConsoleError::Rejected { status: 422, body: "exists".to_string() };
/// assert_eq!(err.kind(), ErrorKind::Validation);
/// ```
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The request never produced an HTTP response (DNS, refused connection, timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered 401. The session has already been cleared when this
    /// variant is returned.
    #[error("Session expired or unauthorized")]
    Unauthorized,

    /// No session token is held, so the request was not sent.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The backend rejected the request with a 4xx status other than 401.
    #[error("Request rejected with status {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnostics only.
        body: String,
    },

    /// The backend failed with a 5xx status.
    #[error("Server error {status}: {body}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnostics only.
        body: String,
    },

    /// A response body did not match the expected schema.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A draft could not be turned into a request body.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Reading or writing the persisted session failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON encoding or decoding outside the HTTP layer failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse failure classes shown in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, no response.
    Network,
    /// 401 or missing session.
    Authentication,
    /// 4xx other than 401, or a draft that cannot be sent.
    Validation,
    /// 5xx, malformed responses and local faults.
    Server,
}

impl ConsoleError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) => ErrorKind::Network,
            Self::Unauthorized | Self::NotAuthenticated => ErrorKind::Authentication,
            Self::Rejected { .. } | Self::Validation(_) => ErrorKind::Validation,
            Self::Server { .. }
            | Self::InvalidResponse(_)
            | Self::Storage(_)
            | Self::Io(_)
            | Self::Config(_)
            | Self::Serialization(_) => ErrorKind::Server,
        }
    }

    /// Returns `true` when the error means the caller must log in again.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::NotAuthenticated)
    }
}

/// A specialized `Result` type for console operations.
pub type Result<T> = std::result::Result<T, ConsoleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_status_failures() {
        assert_eq!(ConsoleError::Unauthorized.kind(), ErrorKind::Authentication);
        assert_eq!(
            ConsoleError::Rejected { status: 404, body: String::new() }.kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            ConsoleError::Server { status: 503, body: String::new() }.kind(),
            ErrorKind::Server
        );
        assert!(ConsoleError::NotAuthenticated.requires_login());
        assert!(!ConsoleError::Validation("x".into()).requires_login());
    }
}
