//! Cooperative cancellation for the fetch worker.
//!
//! The host hands one token to each fetch it starts. Cancelling sets a shared
//! flag; the worker checks it before doing any work, the transport checks it
//! from inside libcurl's callbacks, and the host checks it again before
//! delivering an outcome.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared abort flag for a single fetch attempt. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}
