//! Tests for the get subcommand and its config overrides.

use super::parse;
use crate::cli::{CliCommand, GetArgs};
use clap::Parser;
use netfetch_core::config::FetchConfig;

fn get_args(args: &[&str]) -> GetArgs {
    match parse(args) {
        CliCommand::Get(a) => a,
        other => panic!("expected Get, got {other:?}"),
    }
}

#[test]
fn cli_parse_get_defaults() {
    let a = get_args(&["netfetch", "get", "https://example.com/status.json"]);
    assert_eq!(a.url, "https://example.com/status.json");
    assert!(a.max_chars.is_none());
    assert!(a.connect_timeout_ms.is_none());
    assert!(a.read_timeout_ms.is_none());
    assert!(!a.no_reachability);
    assert!(!a.follow_redirects);
    assert!(!a.progress);
    assert!(!a.json);
}

#[test]
fn cli_parse_get_all_flags() {
    let a = get_args(&[
        "netfetch",
        "get",
        "http://x/",
        "--max-chars",
        "500",
        "--connect-timeout-ms",
        "1000",
        "--read-timeout-ms",
        "2000",
        "--no-reachability",
        "--follow-redirects",
        "--progress",
        "--json",
    ]);
    assert_eq!(a.max_chars, Some(500));
    assert_eq!(a.connect_timeout_ms, Some(1000));
    assert_eq!(a.read_timeout_ms, Some(2000));
    assert!(a.no_reachability && a.follow_redirects && a.progress && a.json);
}

#[test]
fn cli_parse_get_requires_url() {
    assert!(crate::cli::Cli::try_parse_from(["netfetch", "get"]).is_err());
}

#[test]
fn apply_keeps_config_when_no_flags() {
    let a = get_args(&["netfetch", "get", "http://x/"]);
    let base = FetchConfig {
        max_body_chars: Some(42),
        ..FetchConfig::default()
    };
    assert_eq!(a.apply(base.clone()), base);
}

#[test]
fn apply_overrides_config() {
    let a = get_args(&[
        "netfetch",
        "get",
        "http://x/",
        "--max-chars",
        "10",
        "--read-timeout-ms",
        "750",
        "--no-reachability",
    ]);
    let cfg = a.apply(FetchConfig::default());
    assert_eq!(cfg.max_body_chars, Some(10));
    assert_eq!(cfg.read_timeout_ms, 750);
    assert_eq!(cfg.connect_timeout_ms, 3000);
    assert!(!cfg.reachability.enabled);
    assert!(!cfg.follow_redirects);
}
