//! Error types for the sbb-index crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Longest response body kept in an error message.
const MAX_BODY_LEN: usize = 500;

/// Errors that can occur when talking to the index service.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The service rejected the credentials (HTTP 401 or 403).
    #[error("index service rejected credentials (HTTP {status}): {body}")]
    Auth {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// The service answered with any other non-success status.
    #[error("index service returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("index request timed out")]
    Timeout,

    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// The response was not the JSON shape we expected.
    #[error("unexpected index response: {0}")]
    Decode(String),

    /// A document could not be built from its inputs.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// The configured host is not a usable base URL.
    #[error("invalid index host '{host}': {message}")]
    InvalidHost {
        /// Host as configured.
        host: String,
        /// Why it was rejected.
        message: String,
    },

    /// A scraped puzzle file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// File path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl IndexError {
    /// Whether repeating the same request could succeed.
    ///
    /// Credential, document, and configuration errors never fix themselves.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            Self::Auth { .. } | Self::InvalidDocument(_) | Self::InvalidHost { .. }
        )
    }

    /// Classifies a non-success HTTP status.
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let body = truncate(body);
        if status == 401 || status == 403 {
            Self::Auth { status, body }
        } else {
            Self::Status { status, body }
        }
    }

    /// Creates a `Decode` error from a serde error.
    pub(crate) fn decode(source: &serde_json::Error) -> Self {
        Self::Decode(source.to_string())
    }
}

/// Cuts a response body down to `MAX_BODY_LEN` bytes on a char boundary.
fn truncate(body: &str) -> String {
    if body.len() <= MAX_BODY_LEN {
        return body.to_string();
    }
    let mut end = MAX_BODY_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
