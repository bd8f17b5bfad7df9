//! CLI command handlers. Each command is in its own file.

mod completions;
mod config;
mod get;
mod net;

pub use completions::{run_completions, run_man};
pub use config::run_config;
pub use get::run_get;
pub use net::run_net;
