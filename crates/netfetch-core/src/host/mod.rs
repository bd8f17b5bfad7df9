//! Fetch host: owns one URL, at most one in-flight fetch, and an optional sink.
//!
//! `start` cancels whatever is outstanding and spawns a new attempt: the
//! worker runs on Tokio's blocking pool, and delivery (sink callbacks plus the
//! returned [`FetchTicket`]) happens on an async task once the worker returns.
//! A cancelled attempt delivers nothing. Dropping the host disposes it.

mod slot;
mod ticket;

use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use crate::cancel::CancelToken;
use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::outcome::{FetchOutcome, FetchProgress};
use crate::reachability::{Reachability, SystemReachability};
use crate::sink::ResultSink;
use crate::transport::{CurlTransport, Transport};
use crate::worker;

use slot::{lock, Slot};
pub use ticket::FetchTicket;

pub struct FetchHost {
    url: String,
    config: Arc<FetchConfig>,
    reachability: Arc<dyn Reachability>,
    transport: Arc<dyn Transport>,
    slot: Arc<Mutex<Slot>>,
}

impl FetchHost {
    /// Host for `url` using the system reachability probe and libcurl.
    /// The URL is validated when a fetch runs, not here.
    pub fn new(url: impl Into<String>, config: FetchConfig) -> Self {
        Self {
            url: url.into(),
            config: Arc::new(config),
            reachability: Arc::new(SystemReachability::new()),
            transport: Arc::new(CurlTransport::new()),
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    pub fn with_reachability(mut self, reachability: Arc<dyn Reachability>) -> Self {
        self.reachability = reachability;
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Attach the consumer that receives results. Replaces any previous sink.
    pub fn attach(&self, sink: Arc<dyn ResultSink>) {
        let mut slot = lock(&self.slot);
        if slot.disposed {
            tracing::warn!(url = %self.url, "attach on disposed host ignored");
            return;
        }
        slot.sink = Some(sink);
        tracing::debug!(url = %self.url, "sink attached");
    }

    /// Drop the sink reference. A fetch in flight keeps running; its outcome
    /// still reaches the ticket.
    pub fn detach(&self) {
        lock(&self.slot).sink = None;
        tracing::debug!(url = %self.url, "sink detached");
    }

    /// True while a started fetch has neither delivered nor been cancelled.
    pub fn is_running(&self) -> bool {
        lock(&self.slot).in_flight.is_some()
    }

    /// Start a fetch, cancelling any outstanding one first.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start(&self) -> FetchTicket {
        let (generation, token) = {
            let mut slot = lock(&self.slot);
            if slot.disposed {
                tracing::warn!(url = %self.url, "start on disposed host ignored");
                return FetchTicket::closed(slot.generation);
            }
            if slot.in_flight.is_some() {
                tracing::info!(url = %self.url, generation = slot.generation, "fetch cancelled by restart");
            }
            slot.begin()
        };
        tracing::info!(url = %self.url, generation, "fetch started");

        let (tx, rx) = oneshot::channel();
        let url = self.url.clone();
        let config = Arc::clone(&self.config);
        let reachability = Arc::clone(&self.reachability);
        let transport = Arc::clone(&self.transport);
        let slot = Arc::clone(&self.slot);

        tokio::spawn(async move {
            let worker_token = token.clone();
            let progress_slot = Arc::clone(&slot);
            let joined = tokio::task::spawn_blocking(move || {
                let progress =
                    |p: FetchProgress| deliver_progress(&progress_slot, generation, p);
                worker::run_fetch(
                    &url,
                    &config,
                    reachability.as_ref(),
                    transport.as_ref(),
                    &worker_token,
                    &progress,
                )
            })
            .await;

            match joined {
                Ok(Some(outcome)) => deliver(&slot, generation, &token, outcome, tx),
                Ok(None) => tracing::debug!(generation, "fetch cancelled, nothing delivered"),
                Err(e) if e.is_cancelled() => {
                    tracing::debug!(generation, "fetch worker cancelled by runtime shutdown")
                }
                Err(e) => {
                    tracing::error!(generation, "fetch worker panicked: {}", e);
                    let outcome =
                        FetchOutcome::Failed(FetchError::Io(format!("fetch worker failed: {}", e)));
                    deliver(&slot, generation, &token, outcome, tx);
                }
            }
        });

        FetchTicket::new(generation, rx)
    }

    /// Cancel the outstanding fetch, if any. It will deliver nothing.
    pub fn cancel(&self) -> bool {
        let cancelled = lock(&self.slot).cancel_in_flight();
        if cancelled {
            tracing::info!(url = %self.url, "download cancelled");
        }
        cancelled
    }

    /// Cancel any fetch and drop the sink. Later `start` calls return closed tickets.
    pub fn dispose(&self) {
        let mut slot = lock(&self.slot);
        if slot.disposed {
            return;
        }
        slot.dispose();
        tracing::debug!(url = %self.url, "host disposed");
    }
}

impl Drop for FetchHost {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn deliver(
    slot: &Mutex<Slot>,
    generation: u64,
    token: &CancelToken,
    outcome: FetchOutcome,
    tx: oneshot::Sender<FetchOutcome>,
) {
    let sink = match lock(slot).commit(generation, token) {
        Some(sink) => sink,
        None => {
            tracing::debug!(generation, "stale outcome dropped");
            return;
        }
    };
    if let Some(sink) = sink {
        tracing::debug!(generation, "sending result to sink");
        sink.on_result(outcome.sink_message().as_deref());
        sink.on_finished();
    }
    let _ = tx.send(outcome);
}

fn deliver_progress(slot: &Mutex<Slot>, generation: u64, progress: FetchProgress) {
    let sink = lock(slot).progress_sink(generation);
    if let Some(sink) = sink {
        sink.on_progress(progress);
    }
}
