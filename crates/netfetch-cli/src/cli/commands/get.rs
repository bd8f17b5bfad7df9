//! `netfetch get` – fetch one URL and print the outcome.

use anyhow::Result;
use netfetch_core::config::FetchConfig;
use netfetch_core::{FetchHost, FetchOutcome, FetchProgress, ResultSink};
use std::sync::Arc;

use crate::cli::GetArgs;

/// Sink that reports progress on stderr. The outcome itself is read from the ticket.
struct StderrProgress;

impl ResultSink for StderrProgress {
    fn on_result(&self, _body_or_error: Option<&str>) {}

    fn on_finished(&self) {}

    fn on_progress(&self, progress: FetchProgress) {
        match progress {
            FetchProgress::Connected => eprintln!("  connected"),
            FetchProgress::ResponseReceived { status } => eprintln!("  HTTP {}", status),
            FetchProgress::Reading { bytes, .. } => match progress.percent() {
                Some(pct) => eprint!("\r  {} bytes ({}%)", bytes, pct),
                None => eprint!("\r  {} bytes", bytes),
            },
            FetchProgress::ReadComplete { bytes } => eprintln!("\r  done, {} bytes", bytes),
        }
    }
}

pub async fn run_get(cfg: &FetchConfig, args: &GetArgs) -> Result<()> {
    let cfg = args.apply(cfg.clone());
    let host = FetchHost::new(args.url.as_str(), cfg);
    if args.progress {
        host.attach(Arc::new(StderrProgress));
    }

    let ticket = host.start();
    let outcome = tokio::select! {
        outcome = ticket.wait() => outcome,
        _ = tokio::signal::ctrl_c() => {
            host.cancel();
            None
        }
    };
    host.dispose();

    let outcome = match outcome {
        Some(o) => o,
        None => anyhow::bail!("fetch of {} cancelled", args.url),
    };

    if args.json {
        println!("{}", outcome_json(&args.url, &outcome));
    } else if let FetchOutcome::Body(body) = &outcome {
        print!("{}", body);
        if !body.ends_with('\n') {
            println!();
        }
    }

    match outcome {
        FetchOutcome::Body(_) => Ok(()),
        FetchOutcome::Failed(e) => Err(anyhow::anyhow!("{}", e)),
        FetchOutcome::Offline => anyhow::bail!("network unavailable, nothing fetched"),
    }
}

pub(crate) fn outcome_json(url: &str, outcome: &FetchOutcome) -> serde_json::Value {
    match outcome {
        FetchOutcome::Body(body) => serde_json::json!({
            "url": url,
            "status": "ok",
            "body": body,
        }),
        FetchOutcome::Failed(e) => serde_json::json!({
            "url": url,
            "status": "error",
            "error": e.to_string(),
        }),
        FetchOutcome::Offline => serde_json::json!({
            "url": url,
            "status": "offline",
            "body": serde_json::Value::Null,
        }),
    }
}
