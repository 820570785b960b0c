//! Error types for coach-api

use thiserror::Error;

/// Result type alias using coach-api Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the agent service
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure (connection refused, DNS, broken pipe)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service replied with a non-success status
    #[error("agent service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// The HTTP status code, if the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            Error::Decode(_) => None,
        }
    }

    /// True if the request never produced a usable HTTP response
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }
}
