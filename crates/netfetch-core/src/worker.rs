//! The fetch worker: one blocking attempt from URL to outcome.
//!
//! Order of checks: cancellation, URL validation, reachability, GET, status,
//! body. Every failure becomes [`FetchOutcome::Failed`]; cancellation at any
//! point yields `None` so the caller delivers nothing.

use crate::body;
use crate::cancel::CancelToken;
use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::outcome::{FetchOutcome, FetchProgress};
use crate::reachability::{self, Reachability};
use crate::transport::{Transport, TransportRequest};
use crate::url_model;

/// Runs one fetch attempt on the current thread. Call from `spawn_blocking`
/// when used from async code.
pub fn run_fetch(
    url: &str,
    config: &FetchConfig,
    reachability: &dyn Reachability,
    transport: &dyn Transport,
    cancel: &CancelToken,
    progress: &dyn Fn(FetchProgress),
) -> Option<FetchOutcome> {
    if cancel.is_cancelled() {
        tracing::debug!(url, "fetch cancelled before start");
        return None;
    }

    let parsed = match url_model::parse_fetch_url(url) {
        Ok(u) => u,
        Err(e) => {
            tracing::info!(url, "rejecting fetch: {}", e);
            return Some(FetchOutcome::Failed(e));
        }
    };

    if config.reachability.enabled {
        let status = reachability.active_network();
        if !reachability::is_usable(status, &config.reachability.allowed_kinds) {
            tracing::warn!(url, ?status, "network unavailable, aborting");
            return Some(FetchOutcome::Offline);
        }
    }

    if cancel.is_cancelled() {
        return None;
    }

    let request = TransportRequest {
        url: &parsed,
        connect_timeout: config.connect_timeout(),
        read_timeout: config.read_timeout(),
        max_bytes: body::byte_budget(config.max_body_chars),
        user_agent: config.user_agent.as_deref(),
        follow_redirects: config.follow_redirects,
    };

    let response = match transport.get(&request, cancel, progress) {
        Ok(r) => r,
        Err(FetchError::Cancelled) => return None,
        Err(e) => {
            tracing::info!(url, "fetch failed: {}", e);
            return Some(FetchOutcome::Failed(e));
        }
    };

    if cancel.is_cancelled() {
        return None;
    }

    if response.status != 200 {
        tracing::info!(url, status = response.status, "non-200 response");
        return Some(FetchOutcome::Failed(FetchError::HttpStatus(response.status)));
    }

    match body::decode_body(&response.body, config.max_body_chars) {
        Ok(text) => {
            tracing::debug!(url, chars = text.chars().count(), "fetch succeeded");
            Some(FetchOutcome::Body(text))
        }
        Err(e) => {
            tracing::info!(url, "fetch failed: {}", e);
            Some(FetchOutcome::Failed(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reachability::{NetworkKind, StaticReachability};
    use crate::transport::HttpResponse;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Transport returning a canned response and counting calls.
    struct CannedTransport {
        response: Result<HttpResponse, FetchError>,
        calls: AtomicUsize,
        seen_max_bytes: Mutex<Option<Option<usize>>>,
    }

    impl CannedTransport {
        fn ok(status: u32, body: &str) -> Self {
            Self::with(Ok(HttpResponse {
                status,
                body: body.as_bytes().to_vec(),
            }))
        }

        fn with(response: Result<HttpResponse, FetchError>) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
                seen_max_bytes: Mutex::new(None),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Transport for CannedTransport {
        fn get(
            &self,
            request: &TransportRequest<'_>,
            _cancel: &CancelToken,
            _progress: &dyn Fn(FetchProgress),
        ) -> Result<HttpResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.seen_max_bytes.lock().unwrap() = Some(request.max_bytes);
            self.response.clone()
        }
    }

    fn online() -> StaticReachability {
        StaticReachability::online(NetworkKind::Wifi)
    }

    fn run(url: &str, cfg: &FetchConfig, r: &dyn Reachability, t: &dyn Transport) -> Option<FetchOutcome> {
        run_fetch(url, cfg, r, t, &CancelToken::new(), &|_| {})
    }

    #[test]
    fn body_on_200() {
        let t = CannedTransport::ok(200, "{\"ok\":true}\n");
        let out = run("http://example.com/", &FetchConfig::default(), &online(), &t);
        assert_eq!(out, Some(FetchOutcome::Body("{\"ok\":true}\n".into())));
        assert_eq!(t.calls(), 1);
    }

    #[test]
    fn malformed_url_never_reaches_transport() {
        let t = CannedTransport::ok(200, "unused");
        for raw in ["", "nope", "ftp://example.com/x", "http://"] {
            let out = run(raw, &FetchConfig::default(), &online(), &t);
            assert!(
                matches!(out, Some(FetchOutcome::Failed(FetchError::MalformedUrl(_)))),
                "{raw}: {out:?}"
            );
        }
        assert_eq!(t.calls(), 0);
    }

    #[test]
    fn malformed_url_is_an_error_even_offline() {
        let t = CannedTransport::ok(200, "unused");
        let out = run("::", &FetchConfig::default(), &StaticReachability::offline(), &t);
        assert!(matches!(out, Some(FetchOutcome::Failed(FetchError::MalformedUrl(_)))));
    }

    #[test]
    fn offline_never_reaches_transport() {
        let t = CannedTransport::ok(200, "unused");
        let out = run(
            "http://example.com/",
            &FetchConfig::default(),
            &StaticReachability::offline(),
            &t,
        );
        assert_eq!(out, Some(FetchOutcome::Offline));
        assert_eq!(t.calls(), 0);
    }

    #[test]
    fn disallowed_kind_is_offline() {
        let t = CannedTransport::ok(200, "unused");
        let mut cfg = FetchConfig::default();
        cfg.reachability.allowed_kinds = vec![NetworkKind::Wifi, NetworkKind::Mobile];
        let out = run(
            "http://example.com/",
            &cfg,
            &StaticReachability::online(NetworkKind::Other),
            &t,
        );
        assert_eq!(out, Some(FetchOutcome::Offline));
        assert_eq!(t.calls(), 0);
    }

    #[test]
    fn reachability_check_can_be_disabled() {
        let t = CannedTransport::ok(200, "hi");
        let mut cfg = FetchConfig::default();
        cfg.reachability.enabled = false;
        let out = run("http://example.com/", &cfg, &StaticReachability::offline(), &t);
        assert_eq!(out, Some(FetchOutcome::Body("hi".into())));
    }

    #[test]
    fn non_200_is_error_without_body() {
        for status in [201, 204, 301, 404, 500] {
            let t = CannedTransport::ok(status, "error page");
            let out = run("http://example.com/", &FetchConfig::default(), &online(), &t).unwrap();
            assert_eq!(out, FetchOutcome::Failed(FetchError::HttpStatus(status)));
            assert!(out.sink_message().unwrap().contains(&status.to_string()));
            assert!(out.body().is_none());
        }
    }

    #[test]
    fn empty_body_is_error() {
        let t = CannedTransport::ok(200, "");
        let out = run("http://example.com/", &FetchConfig::default(), &online(), &t);
        assert_eq!(out, Some(FetchOutcome::Failed(FetchError::EmptyResponse)));
    }

    #[test]
    fn transport_errors_become_failed_outcomes() {
        let t = CannedTransport::with(Err(FetchError::Timeout("read".into())));
        let out = run("http://example.com/", &FetchConfig::default(), &online(), &t);
        assert_eq!(
            out,
            Some(FetchOutcome::Failed(FetchError::Timeout("read".into())))
        );
    }

    #[test]
    fn cancelled_transport_yields_nothing() {
        let t = CannedTransport::with(Err(FetchError::Cancelled));
        assert_eq!(
            run("http://example.com/", &FetchConfig::default(), &online(), &t),
            None
        );
    }

    #[test]
    fn pre_cancelled_token_skips_everything() {
        let t = CannedTransport::ok(200, "unused");
        let token = CancelToken::new();
        token.cancel();
        let out = run_fetch(
            "not even a url",
            &FetchConfig::default(),
            &online(),
            &t,
            &token,
            &|_| {},
        );
        assert_eq!(out, None);
        assert_eq!(t.calls(), 0);
    }

    #[test]
    fn char_cap_truncates_and_bounds_read() {
        let t = CannedTransport::ok(200, "abcdefghij");
        let mut cfg = FetchConfig::default();
        cfg.max_body_chars = Some(4);
        let out = run("http://example.com/", &cfg, &online(), &t);
        assert_eq!(out, Some(FetchOutcome::Body("abcd".into())));
        assert_eq!(*t.seen_max_bytes.lock().unwrap(), Some(Some(16)));
    }
}
