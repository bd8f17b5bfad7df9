//! HTTP GET boundary.
//!
//! The worker talks to the network only through [`Transport`]. The default
//! implementation, [`CurlTransport`], drives one libcurl easy handle per fetch
//! and releases it through an RAII guard on every exit path.

mod easy;
mod guard;

use std::time::Duration;
use url::Url;

use crate::cancel::CancelToken;
use crate::error::FetchError;
use crate::outcome::FetchProgress;

pub use easy::CurlTransport;
pub use guard::ConnectionCounters;

/// Parameters of one GET.
#[derive(Debug, Clone)]
pub struct TransportRequest<'a> {
    pub url: &'a Url,
    pub connect_timeout: Duration,
    /// Abort when no body bytes arrive for this long.
    pub read_timeout: Duration,
    /// Stop reading (successfully) once this many body bytes are buffered.
    pub max_bytes: Option<usize>,
    pub user_agent: Option<&'a str>,
    pub follow_redirects: bool,
}

/// Status and raw body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Performs a blocking GET. Implementations must check `cancel` while the
/// request is in flight where the underlying client allows it, return
/// [`FetchError::Cancelled`] when it fires, and release every connection
/// resource before returning.
pub trait Transport: Send + Sync {
    fn get(
        &self,
        request: &TransportRequest<'_>,
        cancel: &CancelToken,
        progress: &dyn Fn(FetchProgress),
    ) -> Result<HttpResponse, FetchError>;
}
