//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use relay_proxy::config::RelayConfig;
use relay_proxy::lifecycle::startup::build_server;
use relay_proxy::Shutdown;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Canned upstream answer.
#[derive(Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl MockResponse {
    pub fn ok(body: &str) -> Self {
        Self::with_status(200, body)
    }

    pub fn with_status(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    fn to_bytes(&self) -> Vec<u8> {
        let reason = match self.status {
            200 => "OK",
            302 => "Found",
            404 => "Not Found",
            500 => "Internal Server Error",
            503 => "Service Unavailable",
            _ => "Unknown",
        };
        let mut head = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n",
            self.status,
            reason,
            self.body.len()
        );
        for (name, value) in &self.headers {
            head.push_str(&format!("{}: {}\r\n", name, value));
        }
        head.push_str("\r\n");

        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

/// A running mock upstream.
pub struct MockUpstream {
    pub addr: SocketAddr,
    /// Raw request heads received, in arrival order.
    pub requests: Arc<Mutex<Vec<String>>>,
    /// Connections accepted and not yet closed by the peer.
    pub open_connections: Arc<AtomicUsize>,
    /// Connections accepted in total.
    pub accepted: Arc<AtomicUsize>,
}

impl MockUpstream {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Wait until the relay has closed every connection it opened.
    pub async fn wait_until_idle(&self, limit: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + limit;
        while tokio::time::Instant::now() < deadline {
            if self.open_connections.load(Ordering::SeqCst) == 0 {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.open_connections.load(Ordering::SeqCst) == 0
    }
}

/// Start a mock upstream answering with whatever `f` returns for the path.
///
/// Connections are kept alive after the response so that closing them is
/// left to the client.
pub async fn start_mock_upstream<F>(f: F) -> MockUpstream
where
    F: Fn(&str) -> MockResponse + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let open_connections = Arc::new(AtomicUsize::new(0));
    let accepted = Arc::new(AtomicUsize::new(0));
    let f = Arc::new(f);

    let mock = MockUpstream {
        addr,
        requests: requests.clone(),
        open_connections: open_connections.clone(),
        accepted: accepted.clone(),
    };

    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            accepted.fetch_add(1, Ordering::SeqCst);
            open_connections.fetch_add(1, Ordering::SeqCst);
            let f = f.clone();
            let requests = requests.clone();
            let open_connections = open_connections.clone();
            tokio::spawn(async move {
                serve_connection(socket, f.as_ref(), &requests).await;
                open_connections.fetch_sub(1, Ordering::SeqCst);
            });
        }
    });

    mock
}

async fn serve_connection<F>(mut socket: TcpStream, f: &F, requests: &Mutex<Vec<String>>)
where
    F: Fn(&str) -> MockResponse,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        // Serve every request head that is fully buffered.
        while let Some(end) = find_head_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..end]).to_string();
            buf.drain(..end + 4);
            let path = head
                .split_whitespace()
                .nth(1)
                .unwrap_or("/")
                .to_string();
            requests.lock().unwrap().push(head);
            if socket.write_all(&f(&path).to_bytes()).await.is_err() {
                return;
            }
        }

        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }
}

fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// An address nothing listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start the relay in front of `upstream_url` and return its address.
pub async fn start_relay(upstream_url: &str) -> (SocketAddr, Shutdown) {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.url = upstream_url.into();
    start_relay_with(config).await
}

pub async fn start_relay_with(config: RelayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = build_server(config).unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Test client that never goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
