pub mod config;
pub mod logging;

pub mod body;
pub mod cancel;
pub mod error;
pub mod host;
pub mod outcome;
pub mod reachability;
pub mod sink;
pub mod transport;
pub mod url_model;
pub mod worker;

pub use cancel::CancelToken;
pub use config::FetchConfig;
pub use error::FetchError;
pub use host::{FetchHost, FetchTicket};
pub use outcome::{FetchOutcome, FetchProgress};
pub use reachability::{NetworkKind, NetworkStatus, Reachability};
pub use sink::ResultSink;
pub use transport::Transport;
