//! Reachability from the operating system's interface table.

use super::classify::{classify_interface, rank};
use super::{NetworkStatus, Reachability};

/// Reports the best interface that is up, running, not loopback, and carries
/// an IPv4 or IPv6 address.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemReachability;

impl SystemReachability {
    pub fn new() -> Self {
        Self
    }
}

impl Reachability for SystemReachability {
    fn active_network(&self) -> Option<NetworkStatus> {
        let interfaces = match list_interfaces() {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("reachability: interface listing failed: {}", e);
                return None;
            }
        };
        let best = interfaces
            .iter()
            .map(|name| (name, classify_interface(name, has_wireless_dir(name))))
            .min_by_key(|(_, kind)| rank(*kind));
        match best {
            Some((name, kind)) => {
                tracing::debug!(interface = %name, %kind, "reachability: active network");
                Some(NetworkStatus {
                    connected: true,
                    kind,
                })
            }
            None => {
                tracing::debug!("reachability: no usable interface");
                None
            }
        }
    }
}

fn has_wireless_dir(name: &str) -> bool {
    std::path::Path::new("/sys/class/net")
        .join(name)
        .join("wireless")
        .exists()
}

/// Names of interfaces that are up, running, non-loopback, with an IP address.
#[cfg(unix)]
fn list_interfaces() -> std::io::Result<Vec<String>> {
    use std::ffi::CStr;

    let mut addrs: *mut libc::ifaddrs = std::ptr::null_mut();
    // SAFETY: getifaddrs writes a list head into `addrs` on success.
    if unsafe { libc::getifaddrs(&mut addrs) } != 0 {
        return Err(std::io::Error::last_os_error());
    }

    let mut names: Vec<String> = Vec::new();
    let mut cur = addrs;
    while !cur.is_null() {
        // SAFETY: `cur` is a node of the list returned by getifaddrs, valid until freeifaddrs.
        let ifa = unsafe { &*cur };
        cur = ifa.ifa_next;

        if ifa.ifa_addr.is_null() || ifa.ifa_name.is_null() {
            continue;
        }
        // SAFETY: checked non-null above.
        let family = i32::from(unsafe { (*ifa.ifa_addr).sa_family });
        if family != libc::AF_INET && family != libc::AF_INET6 {
            continue;
        }
        let flags = ifa.ifa_flags as libc::c_int;
        if flags & libc::IFF_UP == 0 || flags & libc::IFF_RUNNING == 0 {
            continue;
        }
        if flags & libc::IFF_LOOPBACK != 0 {
            continue;
        }
        // SAFETY: checked non-null above; getifaddrs names are NUL-terminated.
        let name = unsafe { CStr::from_ptr(ifa.ifa_name) }
            .to_string_lossy()
            .into_owned();
        if !names.contains(&name) {
            names.push(name);
        }
    }

    // SAFETY: `addrs` came from a successful getifaddrs and is freed once.
    unsafe { libc::freeifaddrs(addrs) };
    Ok(names)
}

#[cfg(not(unix))]
fn list_interfaces() -> std::io::Result<Vec<String>> {
    // No interface table; assume a generic connected network.
    Ok(vec![String::from("default")])
}
