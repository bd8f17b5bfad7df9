//! Network reachability: pre-flight check before a connection is attempted.
//!
//! A [`Reachability`] answers with the host's active network, if any. The
//! worker treats "no active network", "not connected", and "kind not allowed"
//! alike: the fetch ends as offline without opening a connection.

mod classify;
mod system;

use serde::{Deserialize, Serialize};

pub use classify::classify_interface;
pub use system::SystemReachability;

/// Kind of the active network path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    Wifi,
    Mobile,
    /// Wired, tethered, VPN, or anything not recognisably wifi/mobile.
    Other,
}

impl std::fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkKind::Wifi => write!(f, "wifi"),
            NetworkKind::Mobile => write!(f, "mobile"),
            NetworkKind::Other => write!(f, "other"),
        }
    }
}

/// Snapshot of the active network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkStatus {
    pub connected: bool,
    pub kind: NetworkKind,
}

/// Boundary to the platform's connectivity status.
pub trait Reachability: Send + Sync {
    /// The active network, or `None` when the host has no network at all.
    fn active_network(&self) -> Option<NetworkStatus>;
}

/// True if `status` is a connected network of one of the `allowed` kinds.
pub fn is_usable(status: Option<NetworkStatus>, allowed: &[NetworkKind]) -> bool {
    match status {
        Some(s) => s.connected && allowed.contains(&s.kind),
        None => false,
    }
}

/// Reachability with a fixed answer. Useful for hosts that track connectivity
/// themselves, and for tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticReachability(pub Option<NetworkStatus>);

impl StaticReachability {
    pub fn online(kind: NetworkKind) -> Self {
        Self(Some(NetworkStatus {
            connected: true,
            kind,
        }))
    }

    pub fn offline() -> Self {
        Self(None)
    }
}

impl Reachability for StaticReachability {
    fn active_network(&self) -> Option<NetworkStatus> {
        self.0
    }
}
