//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of paths (an index page and archives). Each response can
//! omit `Content-Length` (body delimited by connection close) and can be
//! written in fixed-size chunks with a delay between them. Counts requests and
//! the peak number of responses in flight.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    /// If false, no `Content-Length` header is sent.
    pub send_content_length: bool,
    /// Value sent as `Content-Length` instead of the body size.
    pub declared_length: Option<usize>,
    pub chunk_size: usize,
    pub chunk_delay: Duration,
}

impl Route {
    pub fn archive(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type: "application/zip",
            body,
            send_content_length: true,
            declared_length: None,
            chunk_size: 16 * 1024,
            chunk_delay: Duration::ZERO,
        }
    }

    pub fn html(page: &str) -> Self {
        Self {
            content_type: "text/html; charset=utf-8",
            ..Self::archive(page.as_bytes().to_vec())
        }
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn without_content_length(mut self) -> Self {
        self.send_content_length = false;
        self
    }

    /// Announces `len` bytes whatever the body size is. The connection is
    /// closed after the body, so a larger value looks like a cut transfer.
    pub fn declared_length(mut self, len: usize) -> Self {
        self.send_content_length = true;
        self.declared_length = Some(len);
        self
    }

    pub fn chunked(mut self, chunk_size: usize, chunk_delay: Duration) -> Self {
        self.chunk_size = chunk_size.max(1);
        self.chunk_delay = chunk_delay;
        self
    }
}

#[derive(Debug, Default)]
struct Counters {
    requests: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

pub struct ArchiveServer {
    base_url: String,
    counters: Arc<Counters>,
}

impl ArchiveServer {
    /// Base URL with trailing slash, e.g. "http://127.0.0.1:12345/".
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `path` (no leading slash).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn request_count(&self) -> usize {
        self.counters.requests.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.counters.max_in_flight.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread. `routes` receives the base URL so
/// pages can contain absolute links back to the server. Unknown paths get 404.
/// The server runs until the process exits.
pub fn start<F>(routes: F) -> ArchiveServer
where
    F: FnOnce(&str) -> Vec<(&'static str, Route)>,
{
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base_url = format!("http://127.0.0.1:{}/", port);
    let table: HashMap<String, Route> = routes(&base_url)
        .into_iter()
        .map(|(path, route)| (format!("/{}", path.trim_start_matches('/')), route))
        .collect();
    let table = Arc::new(table);
    let counters = Arc::new(Counters::default());

    let server_counters = Arc::clone(&counters);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let table = Arc::clone(&table);
            let counters = Arc::clone(&server_counters);
            thread::spawn(move || handle(stream, &table, &counters));
        }
    });

    ArchiveServer { base_url, counters }
}

fn handle(mut stream: TcpStream, table: &HashMap<String, Route>, counters: &Counters) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let path = request_path(request);

    counters.requests.fetch_add(1, Ordering::SeqCst);
    let now = counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    counters.max_in_flight.fetch_max(now, Ordering::SeqCst);

    match table.get(path) {
        Some(route) => write_route(&mut stream, route),
        None => {
            let _ = stream.write_all(
                b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\nConnection: close\r\n\r\nnot found",
            );
        }
    }
    counters.in_flight.fetch_sub(1, Ordering::SeqCst);

    let _ = stream.flush();
    let _ = stream.shutdown(Shutdown::Write);
}

fn write_route(stream: &mut TcpStream, route: &Route) {
    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nConnection: close\r\n",
        route.status,
        reason(route.status),
        route.content_type
    );
    if route.send_content_length {
        let len = route.declared_length.unwrap_or(route.body.len());
        head.push_str(&format!("Content-Length: {}\r\n", len));
    }
    head.push_str("\r\n");
    if stream.write_all(head.as_bytes()).is_err() {
        return;
    }
    for (i, chunk) in route.body.chunks(route.chunk_size).enumerate() {
        if i > 0 && !route.chunk_delay.is_zero() {
            thread::sleep(route.chunk_delay);
        }
        if stream.write_all(chunk).is_err() || stream.flush().is_err() {
            return;
        }
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Returns the request target of the first line, without query string.
fn request_path(request: &str) -> &str {
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    target.split('?').next().unwrap_or(target)
}
