//! Single-shot handle on the outcome of one fetch.

use tokio::sync::oneshot;

use crate::outcome::FetchOutcome;

/// Resolves to the outcome of the fetch it was returned for, or `None` if that
/// fetch was cancelled (by `cancel`, a newer `start`, or disposal).
#[derive(Debug)]
pub struct FetchTicket {
    generation: u64,
    rx: oneshot::Receiver<FetchOutcome>,
}

impl FetchTicket {
    pub(super) fn new(generation: u64, rx: oneshot::Receiver<FetchOutcome>) -> Self {
        Self { generation, rx }
    }

    /// A ticket that resolves to `None` immediately.
    pub(super) fn closed(generation: u64) -> Self {
        let (_tx, rx) = oneshot::channel();
        Self { generation, rx }
    }

    /// Generation of the fetch this ticket belongs to (1 for the first start).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub async fn wait(self) -> Option<FetchOutcome> {
        self.rx.await.ok()
    }

    /// Non-blocking poll: the outcome if it has already been delivered.
    pub fn try_outcome(&mut self) -> Option<FetchOutcome> {
        self.rx.try_recv().ok()
    }
}
