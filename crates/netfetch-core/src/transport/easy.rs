//! libcurl-backed transport: one easy handle per GET.
//!
//! Connect timeout maps to `CURLOPT_CONNECTTIMEOUT`. The read timeout maps to a
//! low-speed limit of 1 byte/s over the timeout window, which aborts a transfer
//! that stalls while waiting for headers or between body chunks. Cancellation
//! is checked from the progress and write callbacks; returning `false`/`0` from
//! either aborts the transfer inside libcurl.

use std::cell::Cell;
use std::str;
use std::sync::Arc;
use std::time::Duration;

use curl::easy::Easy;

use super::guard::{ConnectionCounters, ConnectionGuard};
use super::{HttpResponse, Transport, TransportRequest};
use crate::cancel::CancelToken;
use crate::error::FetchError;
use crate::outcome::FetchProgress;

/// Transport over libcurl. Clones share the same connection counters.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    counters: Arc<ConnectionCounters>,
}

impl CurlTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open/release counters for every connection made through this transport.
    pub fn counters(&self) -> &ConnectionCounters {
        &self.counters
    }
}

impl Transport for CurlTransport {
    fn get(
        &self,
        request: &TransportRequest<'_>,
        cancel: &CancelToken,
        progress: &dyn Fn(FetchProgress),
    ) -> Result<HttpResponse, FetchError> {
        let mut conn = ConnectionGuard::open(Easy::new(), &self.counters);
        configure(&mut conn.handle, request).map_err(|e| map_curl_error(&e))?;
        tracing::debug!(url = %request.url, "connection opened");

        let mut body: Vec<u8> = Vec::new();
        let status = Cell::new(0u32);
        let content_length: Cell<Option<u64>> = Cell::new(None);
        let connected = Cell::new(false);
        let limit_reached = Cell::new(false);

        let performed = {
            let mut transfer = conn.handle.transfer();
            transfer
                .header_function(|data| {
                    let line = match str::from_utf8(data) {
                        Ok(s) => s.trim_end(),
                        Err(_) => return true,
                    };
                    if let Some(code) = parse_status_line(line) {
                        if !connected.get() {
                            connected.set(true);
                            progress(FetchProgress::Connected);
                        }
                        // A redirect or 1xx block is followed by another status line.
                        status.set(code);
                        content_length.set(None);
                    } else if line.is_empty() {
                        if status.get() >= 200 {
                            progress(FetchProgress::ResponseReceived {
                                status: status.get(),
                            });
                        }
                    } else if let Some(len) = parse_content_length(line) {
                        content_length.set(Some(len));
                    }
                    true
                })
                .map_err(|e| map_curl_error(&e))?;
            transfer
                .write_function(|data| {
                    if cancel.is_cancelled() {
                        return Ok(0);
                    }
                    if let Some(max) = request.max_bytes {
                        let room = max.saturating_sub(body.len());
                        if data.len() >= room {
                            body.extend_from_slice(&data[..room]);
                            limit_reached.set(true);
                            return Ok(0);
                        }
                    }
                    body.extend_from_slice(data);
                    progress(FetchProgress::Reading {
                        bytes: body.len() as u64,
                        total: content_length.get(),
                    });
                    // A sink may cancel from inside the progress callback.
                    if cancel.is_cancelled() {
                        return Ok(0);
                    }
                    Ok(data.len())
                })
                .map_err(|e| map_curl_error(&e))?;
            transfer
                .progress_function(|_, _, _, _| !cancel.is_cancelled())
                .map_err(|e| map_curl_error(&e))?;
            transfer.perform()
        };

        if let Err(e) = performed {
            if cancel.is_cancelled() {
                tracing::debug!(url = %request.url, "transfer aborted by cancellation");
                return Err(FetchError::Cancelled);
            }
            if !(e.is_write_error() && limit_reached.get()) {
                tracing::debug!(url = %request.url, "transfer failed: {}", e);
                return Err(map_curl_error(&e));
            }
            tracing::debug!(url = %request.url, bytes = body.len(), "body limit reached");
        }

        let code = conn
            .handle
            .response_code()
            .map_err(|e| map_curl_error(&e))?;
        if code == 200 {
            progress(FetchProgress::ReadComplete {
                bytes: body.len() as u64,
            });
        }
        tracing::debug!(url = %request.url, status = code, bytes = body.len(), "response read");
        Ok(HttpResponse { status: code, body })
    }
}

fn configure(easy: &mut Easy, request: &TransportRequest<'_>) -> Result<(), curl::Error> {
    easy.url(request.url.as_str())?;
    easy.get(true)?;
    easy.follow_location(request.follow_redirects)?;
    if request.follow_redirects {
        easy.max_redirections(10)?;
    }
    easy.connect_timeout(connect_window(request.connect_timeout))?;
    easy.low_speed_limit(1)?;
    easy.low_speed_time(whole_seconds(request.read_timeout))?;
    easy.progress(true)?;
    if let Some(ua) = request.user_agent {
        easy.useragent(ua)?;
    }
    Ok(())
}

/// libcurl reads a zero connect timeout as its 300s default; keep at least 1ms.
fn connect_window(d: Duration) -> Duration {
    d.max(Duration::from_millis(1))
}

/// libcurl's low-speed window has one-second resolution; round up, minimum 1s.
fn whole_seconds(d: Duration) -> Duration {
    let millis = d.as_millis().max(1);
    Duration::from_secs(millis.div_ceil(1000) as u64)
}

/// Status code from an `HTTP/x.y NNN reason` line.
fn parse_status_line(line: &str) -> Option<u32> {
    if !line.starts_with("HTTP/") {
        return None;
    }
    line.split_whitespace().nth(1)?.parse::<u32>().ok()
}

fn parse_content_length(line: &str) -> Option<u64> {
    let (name, value) = line.split_once(':')?;
    if !name.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse::<u64>().ok()
}

fn map_curl_error(e: &curl::Error) -> FetchError {
    if e.is_operation_timedout() {
        return FetchError::Timeout(e.to_string());
    }
    if e.is_url_malformed() || e.is_unsupported_protocol() {
        return FetchError::MalformedUrl(e.to_string());
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_ssl_connect_error()
        || e.is_send_error()
        || e.is_recv_error()
        || e.is_got_nothing()
    {
        return FetchError::Connection(e.to_string());
    }
    FetchError::Io(e.to_string())
}
