//! RAII guard that releases a connection handle exactly once.

use std::sync::atomic::{AtomicU64, Ordering};

/// Open/release counters shared by all connections of one transport.
#[derive(Debug, Default)]
pub struct ConnectionCounters {
    opened: AtomicU64,
    released: AtomicU64,
}

impl ConnectionCounters {
    pub fn opened(&self) -> u64 {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> u64 {
        self.released.load(Ordering::SeqCst)
    }

    /// Connections opened but not yet released.
    pub fn in_use(&self) -> u64 {
        self.opened().saturating_sub(self.released())
    }
}

/// Owns a connection handle; dropping the guard drops the handle (closing the
/// socket and any response stream) and records the release.
pub(super) struct ConnectionGuard<'a, H> {
    pub(super) handle: H,
    counters: &'a ConnectionCounters,
}

impl<'a, H> ConnectionGuard<'a, H> {
    pub(super) fn open(handle: H, counters: &'a ConnectionCounters) -> Self {
        counters.opened.fetch_add(1, Ordering::SeqCst);
        Self { handle, counters }
    }
}

impl<H> Drop for ConnectionGuard<'_, H> {
    fn drop(&mut self) {
        let released = self.counters.released.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!(released, "connection released");
    }
}
