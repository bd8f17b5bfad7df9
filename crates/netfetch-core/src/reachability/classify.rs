//! Map an interface name to a network kind.

use super::NetworkKind;

/// Name prefixes of cellular modem and PPP interfaces.
const MOBILE_PREFIXES: &[&str] = &["wwan", "ppp", "rmnet", "ccmni"];

/// Name prefixes of wireless LAN interfaces when sysfs is unavailable.
const WIFI_PREFIXES: &[&str] = &["wl", "ath"];

/// Classifies an interface. `has_wireless_dir` is whether
/// `/sys/class/net/<name>/wireless` exists, which is authoritative on Linux.
pub fn classify_interface(name: &str, has_wireless_dir: bool) -> NetworkKind {
    if has_wireless_dir {
        return NetworkKind::Wifi;
    }
    let lower = name.to_ascii_lowercase();
    if MOBILE_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return NetworkKind::Mobile;
    }
    if WIFI_PREFIXES.iter().any(|p| lower.starts_with(p)) {
        return NetworkKind::Wifi;
    }
    NetworkKind::Other
}

/// Preference order when several interfaces are up, mirroring typical default
/// route metrics (wired before wifi before cellular).
pub(super) fn rank(kind: NetworkKind) -> u8 {
    match kind {
        NetworkKind::Other => 0,
        NetworkKind::Wifi => 1,
        NetworkKind::Mobile => 2,
    }
}
