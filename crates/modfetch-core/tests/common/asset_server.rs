//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed table of paths, each with its own status, content type and
//! body. Unknown paths get 404. Every request is counted per path so tests can
//! assert that a URL was fetched once (or not at all), and the peak number of
//! requests being served at the same time is recorded.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Asset {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
    /// Sleep before answering.
    pub delay: Duration,
    /// `Location` header (redirects).
    pub location: Option<String>,
    /// Advertised `Content-Length` when it differs from the body (truncated reply).
    pub content_length: Option<usize>,
}

impl Asset {
    pub fn ok(content_type: &'static str, body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type),
            body: body.to_vec(),
            delay: Duration::ZERO,
            location: None,
            content_length: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            content_type: Some("text/html"),
            body: b"<html>nope</html>".to_vec(),
            delay: Duration::ZERO,
            location: None,
            content_length: None,
        }
    }

    pub fn redirect(location: &str) -> Self {
        Self {
            location: Some(location.to_string()),
            ..Self::status(302)
        }
    }

    /// Promises more bytes than it sends, then closes the connection.
    pub fn truncated(content_type: &'static str, body: &[u8]) -> Self {
        Self {
            content_length: Some(body.len() * 4 + 16),
            ..Self::ok(content_type, body)
        }
    }

    pub fn delayed(self, delay: Duration) -> Self {
        Self { delay, ..self }
    }
}

#[derive(Default)]
struct Stats {
    hits: Mutex<HashMap<String, usize>>,
    active: AtomicUsize,
    peak: AtomicUsize,
}

pub struct AssetServer {
    base: String,
    stats: Arc<Stats>,
}

impl AssetServer {
    /// Absolute URL for `path` (leading slash optional).
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    /// Requests seen for `path`.
    pub fn hits(&self, path: &str) -> usize {
        let key = format!("/{}", path.trim_start_matches('/'));
        self.stats.hits.lock().unwrap().get(&key).copied().unwrap_or(0)
    }

    /// Requests seen across all paths.
    pub fn total_hits(&self) -> usize {
        self.stats.hits.lock().unwrap().values().sum()
    }

    /// Most requests ever served at the same time.
    pub fn peak_concurrency(&self) -> usize {
        self.stats.peak.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread serving `assets` (path → asset).
/// The server runs until the process exits.
pub fn start(assets: Vec<(&str, Asset)>) -> AssetServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let table: Arc<HashMap<String, Asset>> = Arc::new(
        assets
            .into_iter()
            .map(|(p, a)| (format!("/{}", p.trim_start_matches('/')), a))
            .collect(),
    );
    let stats = Arc::new(Stats::default());
    let server_stats = Arc::clone(&stats);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let table = Arc::clone(&table);
            let stats = Arc::clone(&server_stats);
            thread::spawn(move || handle(stream, &table, &stats));
        }
    });
    AssetServer {
        base: format!("http://127.0.0.1:{}", port),
        stats,
    }
}

fn handle(mut stream: TcpStream, table: &HashMap<String, Asset>, stats: &Stats) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let mut parts = request.lines().next().unwrap_or_default().split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts
        .next()
        .unwrap_or("/")
        .split('?')
        .next()
        .unwrap_or("/")
        .to_string();
    *stats.hits.lock().unwrap().entry(path.clone()).or_insert(0) += 1;

    let missing = Asset::status(404);
    let asset = table.get(&path).unwrap_or(&missing);

    // A request counts as in flight until its reply starts, so a client can never
    // see its response before the count drops.
    let now = stats.active.fetch_add(1, Ordering::SeqCst) + 1;
    stats.peak.fetch_max(now, Ordering::SeqCst);
    if !asset.delay.is_zero() {
        thread::sleep(asset.delay);
    }
    stats.active.fetch_sub(1, Ordering::SeqCst);

    let mut head = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n",
        asset.status,
        reason(asset.status),
        asset.content_length.unwrap_or(asset.body.len())
    );
    if let Some(ct) = asset.content_type {
        head.push_str(&format!("Content-Type: {}\r\n", ct));
    }
    if let Some(location) = &asset.location {
        head.push_str(&format!("Location: {}\r\n", location));
    }
    head.push_str("Connection: close\r\n\r\n");
    let _ = stream.write_all(head.as_bytes());
    if !method.eq_ignore_ascii_case("HEAD") {
        let _ = stream.write_all(&asset.body);
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        302 => "Found",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
