//! Domain errors for the stocklens analytics client.

use thiserror::Error;

/// Errors surfaced by the analytics API boundary.
///
/// Only three kinds arise: transport failures before any status line was
/// received, non-success HTTP statuses, and bodies that do not decode
/// into the expected shape. Fetchers never retry, wrap, or classify
/// beyond this mapping; a failed query stays failed until re-fetched.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code of the response.
        status: u16,
        /// Response body text, carried through verbatim for diagnosis.
        body: String,
    },

    #[error("response decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status code, if this error carries one.
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result alias used throughout the API boundary.
pub type ApiResult<T> = Result<T, ApiError>;
