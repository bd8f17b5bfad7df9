//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves one canned response to every GET. Options allow a non-200 status, a
//! delay before responding (to keep a fetch outstanding), and a stall after the
//! headers (to trip the read timeout). Counts requests so tests can assert that
//! no connection was made.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServerOptions {
    pub status: u16,
    pub reason: &'static str,
    pub body: Vec<u8>,
    /// Sleep this long after reading the request, before writing anything.
    pub delay: Option<Duration>,
    /// Send headers and the first few body bytes, then go silent for this long.
    pub stall_after_headers: Option<Duration>,
}

impl ServerOptions {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            reason: "OK",
            body: body.into(),
            delay: None,
            stall_after_headers: None,
        }
    }

    pub fn status(status: u16, reason: &'static str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason,
            ..Self::ok(body)
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn stalled(mut self, stall: Duration) -> Self {
        self.stall_after_headers = Some(stall);
        self
    }
}

pub struct TestServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl TestServer {
    /// Number of requests accepted so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(opts: ServerOptions) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);
    let opts = Arc::new(opts);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            hits_srv.fetch_add(1, Ordering::SeqCst);
            let opts = Arc::clone(&opts);
            thread::spawn(move || handle(stream, &opts));
        }
    });
    TestServer {
        url: format!("http://127.0.0.1:{}/resource", port),
        hits,
    }
}

/// A URL on a port nobody listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/", port)
}

fn handle(mut stream: TcpStream, opts: &ServerOptions) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(_) => {}
    }
    if let Some(delay) = opts.delay {
        thread::sleep(delay);
    }
    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        opts.status,
        opts.reason,
        opts.body.len()
    );
    if stream.write_all(head.as_bytes()).is_err() {
        return;
    }
    if let Some(stall) = opts.stall_after_headers {
        let first = opts.body.len().min(3);
        let _ = stream.write_all(&opts.body[..first]);
        let _ = stream.flush();
        thread::sleep(stall);
        let _ = stream.write_all(&opts.body[first..]);
        return;
    }
    let _ = stream.write_all(&opts.body);
}
