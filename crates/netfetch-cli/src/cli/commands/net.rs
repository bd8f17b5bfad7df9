//! `netfetch net` – show what the reachability pre-flight sees.

use netfetch_core::config::FetchConfig;
use netfetch_core::reachability::{self, Reachability, SystemReachability};

pub fn run_net(cfg: &FetchConfig) {
    let status = SystemReachability::new().active_network();
    match status {
        Some(s) => println!(
            "connected: {}  kind: {}",
            if s.connected { "yes" } else { "no" },
            s.kind
        ),
        None => println!("connected: no  (no active network)"),
    }
    let usable = reachability::is_usable(status, &cfg.reachability.allowed_kinds);
    if cfg.reachability.enabled {
        println!("usable for fetch: {}", if usable { "yes" } else { "no" });
    } else {
        println!("usable for fetch: check disabled in config");
    }
}
