//! `netfetch config` – show config path and effective values.

use anyhow::Result;
use netfetch_core::config::{self, FetchConfig};

pub fn run_config(cfg: &FetchConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
