//! CLI for netfetch.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use netfetch_core::config::{self, FetchConfig};

use commands::{run_completions, run_config, run_get, run_man, run_net};

/// Top-level CLI for netfetch.
#[derive(Debug, Parser)]
#[command(name = "netfetch")]
#[command(about = "netfetch: fetch one URL in the background and print the result", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a URL once and print the body, or the error. Ctrl-C cancels.
    Get(GetArgs),

    /// Show the active network and whether the fetch pre-flight would accept it.
    Net,

    /// Show the config file path and the effective configuration.
    Config,

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Print the man page to stdout.
    Man,
}

/// Arguments of `netfetch get`. Flags override config.toml for this run only.
#[derive(Debug, Args)]
pub struct GetArgs {
    /// Direct HTTP/HTTPS URL to fetch.
    pub url: String,

    /// Truncate the body to N characters.
    #[arg(long, value_name = "N")]
    pub max_chars: Option<usize>,

    /// Connect timeout in milliseconds.
    #[arg(long, value_name = "MS")]
    pub connect_timeout_ms: Option<u64>,

    /// Read timeout in milliseconds.
    #[arg(long, value_name = "MS")]
    pub read_timeout_ms: Option<u64>,

    /// Skip the network reachability pre-flight.
    #[arg(long)]
    pub no_reachability: bool,

    /// Follow HTTP redirects.
    #[arg(long)]
    pub follow_redirects: bool,

    /// Report connection and read progress on stderr.
    #[arg(long)]
    pub progress: bool,

    /// Print the outcome as a JSON object.
    #[arg(long)]
    pub json: bool,
}

impl GetArgs {
    /// Config for this run: `base` with command-line overrides applied.
    pub fn apply(&self, mut base: FetchConfig) -> FetchConfig {
        if let Some(n) = self.max_chars {
            base.max_body_chars = Some(n);
        }
        if let Some(ms) = self.connect_timeout_ms {
            base.connect_timeout_ms = ms;
        }
        if let Some(ms) = self.read_timeout_ms {
            base.read_timeout_ms = ms;
        }
        if self.no_reachability {
            base.reachability.enabled = false;
        }
        if self.follow_redirects {
            base.follow_redirects = true;
        }
        base
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Get(args) => run_get(&load_config()?, &args).await?,
            CliCommand::Net => run_net(&load_config()?),
            CliCommand::Config => run_config(&load_config()?)?,
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

fn load_config() -> Result<FetchConfig> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);
    Ok(cfg)
}

#[cfg(test)]
mod tests;
