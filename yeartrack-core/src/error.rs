//! Error types for yeartrack-core

use thiserror::Error;

/// Main error type for the yeartrack-core library
#[derive(Error, Debug)]
pub enum Error {
    /// The request could not be sent or the server was unreachable
    #[error("transport error: {0}")]
    Transport(String),

    /// The tracker rejected the credential (HTTP 401/403)
    #[error("authentication failed ({status}): {body}")]
    Auth { status: u16, body: String },

    /// Any other non-2xx response from the tracker
    #[error("tracker API error ({status}): {body}")]
    Protocol { status: u16, body: String },

    /// A required input was missing or out of range
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON parsing error (response body did not match the expected schema)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True when the tracker could not be reached at all.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// True when the tracker rejected the credential.
    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth { .. })
    }
}

/// Result type alias for yeartrack-core
pub type Result<T> = std::result::Result<T, Error>;
