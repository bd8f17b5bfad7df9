//! Fetch error type.
//!
//! Every failure inside the worker is converted into one of these variants and
//! delivered as the error arm of the outcome; none of them escape as a panic or
//! a propagated `Err` from the host.

use thiserror::Error;

/// Terminal failure of one fetch attempt. The `Display` text is what a result
/// sink receives in place of a body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// URL could not be parsed or uses a scheme other than http/https.
    #[error("malformed URL: {0}")]
    MalformedUrl(String),
    /// Server answered with anything other than 200.
    #[error("HTTP error code: {0}")]
    HttpStatus(u32),
    /// 200 with an empty body.
    #[error("No response received.")]
    EmptyResponse,
    /// Connect or read timeout elapsed.
    #[error("timed out: {0}")]
    Timeout(String),
    /// DNS, connect, or TLS-level failure before a response arrived.
    #[error("connection failed: {0}")]
    Connection(String),
    /// Any other transport or read failure.
    #[error("I/O error: {0}")]
    Io(String),
    /// The attempt was cancelled. Never delivered to a sink.
    #[error("fetch cancelled")]
    Cancelled,
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}
