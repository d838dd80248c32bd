//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::fs;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Stand-in for the remote access gate.
pub struct MockGate {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<String>>>,
}

impl MockGate {
    /// Base address to hand to `AccessGate::new`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_body(&self) -> Option<String> {
        self.bodies.lock().unwrap().last().cloned()
    }
}

/// Start a mock gate answering every request with a fixed status and body.
pub async fn start_mock_gate(status: u16, body: &'static str) -> MockGate {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let bodies = Arc::new(Mutex::new(Vec::new()));

    let (h, b) = (hits.clone(), bodies.clone());
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let (h, b) = (h.clone(), b.clone());
                    tokio::spawn(async move {
                        let request_body = read_request_body(&mut socket).await;
                        h.fetch_add(1, Ordering::SeqCst);
                        b.lock().unwrap().push(request_body);

                        let status_text = match status {
                            200 => "200 OK",
                            403 => "403 Forbidden",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    MockGate { addr, hits, bodies }
}

async fn read_request_body(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(split) = text.find("\r\n\r\n") {
            let content_length = text[..split]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= split + 4 + content_length {
                return String::from_utf8_lossy(&buf[split + 4..split + 4 + content_length]).to_string();
            }
        }
    }
    String::new()
}

/// In-memory sink for `tracing` output.
#[derive(Clone, Default)]
pub struct LogCapture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buf.lock().unwrap()).to_string()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.buf.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Subscriber writing plain-text records into a shared buffer.
pub fn capture_logs() -> (LogCapture, impl tracing::Subscriber + Send + Sync) {
    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (capture, subscriber)
}

/// Reserve a currently free local port.
pub fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

/// Create a server directory, optionally with a `profiles/DatabaseOptions.json`.
pub fn server_dir(database_options: Option<&str>) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    if let Some(contents) = database_options {
        write_database_options(dir.path(), contents);
    }
    dir
}

pub fn write_database_options(server_dir: &Path, contents: &str) {
    let profiles = server_dir.join("profiles");
    fs::create_dir_all(&profiles).unwrap();
    fs::write(profiles.join("DatabaseOptions.json"), contents).unwrap();
}

/// True if nothing is listening on the port (we can bind it ourselves).
pub fn port_is_free(port: u16) -> bool {
    let any = std::net::TcpListener::bind(("0.0.0.0", port)).is_ok();
    let loopback = std::net::TcpListener::bind(("127.0.0.1", port)).is_ok();
    any && loopback
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
