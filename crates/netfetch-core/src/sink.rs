//! Result sink: the consumer side of a fetch host.
//!
//! A sink attached to a [`FetchHost`](crate::FetchHost) receives, per fetch
//! attempt that is not cancelled, exactly one `on_result` followed by one
//! `on_finished`. Progress events may arrive before that from the worker
//! thread.

use tokio::sync::mpsc;

use crate::outcome::FetchProgress;

pub trait ResultSink: Send + Sync {
    /// The body, the error message, or `None` when no network was available.
    fn on_result(&self, body_or_error: Option<&str>);

    /// Called once after `on_result`.
    fn on_finished(&self);

    fn on_progress(&self, _progress: FetchProgress) {}
}

/// Event forwarded by [`ChannelSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Result(Option<String>),
    Finished,
    Progress(FetchProgress),
}

/// Sink that forwards every callback into an unbounded channel, so an async
/// consumer can observe them in order.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<SinkEvent>,
    forward_progress: bool,
}

impl ChannelSink {
    /// Returns the sink and the receiving end. Progress events are dropped
    /// unless `forward_progress` is set.
    pub fn new(forward_progress: bool) -> (Self, mpsc::UnboundedReceiver<SinkEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                tx,
                forward_progress,
            },
            rx,
        )
    }
}

impl ResultSink for ChannelSink {
    fn on_result(&self, body_or_error: Option<&str>) {
        let _ = self.tx.send(SinkEvent::Result(body_or_error.map(str::to_owned)));
    }

    fn on_finished(&self) {
        let _ = self.tx.send(SinkEvent::Finished);
    }

    fn on_progress(&self, progress: FetchProgress) {
        if self.forward_progress {
            let _ = self.tx.send(SinkEvent::Progress(progress));
        }
    }
}
