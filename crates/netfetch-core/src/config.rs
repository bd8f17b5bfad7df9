use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::reachability::NetworkKind;

/// Pre-flight reachability settings (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReachabilityConfig {
    /// When false, the worker skips the check and always attempts the connection.
    pub enabled: bool,
    /// Network kinds that count as usable. An active network of any other kind
    /// is treated as offline. `["wifi", "mobile"]` rejects wired links.
    pub allowed_kinds: Vec<NetworkKind>,
}

impl Default for ReachabilityConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_kinds: vec![NetworkKind::Wifi, NetworkKind::Mobile, NetworkKind::Other],
        }
    }
}

/// Global configuration loaded from `~/.config/netfetch/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds: the transfer is aborted when no body bytes
    /// arrive for this long.
    pub read_timeout_ms: u64,
    /// Truncate the body to this many characters (None = return the whole body).
    #[serde(default)]
    pub max_body_chars: Option<usize>,
    /// Optional User-Agent header; libcurl sends none by default.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Follow 3xx redirects. Off by default, so a redirect surfaces as a non-200 error.
    #[serde(default)]
    pub follow_redirects: bool,
    #[serde(default)]
    pub reachability: ReachabilityConfig,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 3000,
            read_timeout_ms: 3000,
            max_body_chars: None,
            user_agent: None,
            follow_redirects: false,
            reachability: ReachabilityConfig::default(),
        }
    }
}

impl FetchConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("netfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<FetchConfig> {
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: FetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
