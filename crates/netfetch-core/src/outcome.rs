//! Terminal outcome and progress events of a fetch.

use crate::error::FetchError;

/// Terminal value of one fetch attempt. At most one is produced per attempt;
/// a cancelled attempt produces none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// HTTP 200 with a non-empty body, after the body policy was applied.
    Body(String),
    /// The attempt failed; the error text is what a sink receives.
    Failed(FetchError),
    /// The reachability check found no usable network. No connection was opened.
    Offline,
}

impl FetchOutcome {
    /// What a result sink receives: the body, the error message, or `None` when offline.
    pub fn sink_message(&self) -> Option<String> {
        match self {
            FetchOutcome::Body(body) => Some(body.clone()),
            FetchOutcome::Failed(err) => Some(err.to_string()),
            FetchOutcome::Offline => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            FetchOutcome::Body(body) => Some(body),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchOutcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Body(_))
    }
}

/// Intermediate progress reported while a fetch runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchProgress {
    /// First response bytes arrived; the connection is established.
    Connected,
    /// Response headers are complete.
    ResponseReceived { status: u32 },
    /// Body bytes received so far, with `Content-Length` when the server sent one.
    Reading { bytes: u64, total: Option<u64> },
    /// Body fully read.
    ReadComplete { bytes: u64 },
}

impl FetchProgress {
    /// Percentage of the body read, when the total is known.
    pub fn percent(&self) -> Option<u8> {
        match *self {
            FetchProgress::Reading {
                bytes,
                total: Some(total),
            } if total > 0 => Some(((bytes.min(total) * 100) / total) as u8),
            FetchProgress::ReadComplete { .. } => Some(100),
            _ => None,
        }
    }
}
