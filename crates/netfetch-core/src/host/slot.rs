//! The host's single in-flight slot.
//!
//! All transitions happen under one mutex: starting a fetch cancels the
//! previous token and bumps the generation; an outcome is committed only if its
//! generation is still current and its token was not cancelled. Committing
//! empties the slot, so a later `start` no longer sees that fetch as
//! outstanding.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::cancel::CancelToken;
use crate::sink::ResultSink;

#[derive(Default)]
pub(super) struct Slot {
    pub(super) generation: u64,
    pub(super) in_flight: Option<CancelToken>,
    pub(super) sink: Option<Arc<dyn ResultSink>>,
    pub(super) disposed: bool,
}

/// Lock the slot, recovering from poisoning (the state stays consistent
/// because every transition is a handful of field writes).
pub(super) fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Slot {
    /// Cancels any outstanding fetch and reserves a new generation.
    pub(super) fn begin(&mut self) -> (u64, CancelToken) {
        self.cancel_in_flight();
        self.generation += 1;
        let token = CancelToken::new();
        self.in_flight = Some(token.clone());
        (self.generation, token)
    }

    /// Cancels the outstanding fetch, if any. Returns whether one was cancelled.
    pub(super) fn cancel_in_flight(&mut self) -> bool {
        match self.in_flight.take() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Marks the fetch of `generation` as delivered. Returns `None` if the
    /// outcome must be dropped, otherwise the sink to notify (if attached).
    pub(super) fn commit(
        &mut self,
        generation: u64,
        token: &CancelToken,
    ) -> Option<Option<Arc<dyn ResultSink>>> {
        if self.disposed || generation != self.generation || token.is_cancelled() {
            return None;
        }
        self.in_flight = None;
        Some(self.sink.clone())
    }

    /// Sink for progress of `generation`, if that fetch is still outstanding.
    pub(super) fn progress_sink(&self, generation: u64) -> Option<Arc<dyn ResultSink>> {
        if self.disposed || generation != self.generation || self.in_flight.is_none() {
            return None;
        }
        self.sink.clone()
    }

    pub(super) fn dispose(&mut self) {
        self.cancel_in_flight();
        self.sink = None;
        self.disposed = true;
    }
}
