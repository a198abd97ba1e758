//! Minimal HTTP/1.1 server that plays back scripted progress responses.
//!
//! Each incoming request gets the next `(status, body)` pair from the script;
//! once the script runs out, the last pair is repeated. Every response closes
//! the connection.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Handle to a running server.
pub struct ProgressServer {
    /// Progress URL to poll, e.g. "http://127.0.0.1:12345/progress?id=1".
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl ProgressServer {
    /// Number of requests answered so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Starts a server in a background thread. It runs until the process exits.
pub fn start(script: Vec<(u16, &str)>) -> ProgressServer {
    assert!(!script.is_empty(), "script needs at least one response");
    let script: Arc<Vec<(u16, String)>> = Arc::new(
        script
            .into_iter()
            .map(|(status, body)| (status, body.to_string()))
            .collect(),
    );
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_srv = Arc::clone(&hits);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let n = hits_srv.fetch_add(1, Ordering::SeqCst);
            let (status, body) = script[n.min(script.len() - 1)].clone();
            thread::spawn(move || handle(stream, status, &body));
        }
    });
    ProgressServer {
        url: format!("http://127.0.0.1:{}/progress?id=1", port),
        hits,
    }
}

/// A URL on a port nothing listens on.
pub fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/progress", port)
}

fn handle(mut stream: std::net::TcpStream, status: u16, body: &str) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(_) => {}
    }
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "Status",
    }
}

/// Accepts connections and closes them at once, before any bytes are exchanged.
/// Returns "127.0.0.1:<port>".
pub fn start_dropping() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            drop(stream);
        }
    });
    format!("127.0.0.1:{}", port)
}

/// Accepts connections and never answers, holding each socket open for a minute.
/// Returns "127.0.0.1:<port>".
pub fn start_stalling() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || {
                let _held = stream;
                thread::sleep(std::time::Duration::from_secs(60));
            });
        }
    });
    format!("127.0.0.1:{}", port)
}
