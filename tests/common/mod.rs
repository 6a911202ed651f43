//! Bare-bones HTTP/1.1 server for the cases mockito can't express: slow responses, hang-ups
//! and counting how many connections are still open.
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Debug, Clone)]
pub enum Behavior {
    /// Answer every request with this body
    Respond {
        content_type: &'static str,
        body: String,
    },
    /// Wait before answering, gives up when the client goes away first
    Delay(Duration),
    /// Read the request, then close the socket without answering
    HangUp,
    /// Answer with the posted form fields as a JSON object
    EchoForm,
    /// Answer with the request headers as a JSON object
    EchoHeaders,
    /// Write these bytes verbatim as the response
    Raw(Vec<u8>),
    /// Send the headers and part of the body, then stall until the client goes away
    StallBody,
}

pub struct TestServer {
    addr: SocketAddr,
    open: Arc<AtomicUsize>,
    accepted: Arc<AtomicUsize>,
}

struct OpenGuard(Arc<AtomicUsize>);

impl OpenGuard {
    fn new(open: Arc<AtomicUsize>) -> Self {
        open.fetch_add(1, Ordering::SeqCst);
        Self(open)
    }
}

impl Drop for OpenGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl TestServer {
    pub async fn start(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test server");
        let addr = listener.local_addr().expect("test server address");
        let open = Arc::new(AtomicUsize::new(0));
        let accepted = Arc::new(AtomicUsize::new(0));

        let open_conns = open.clone();
        let accepted_conns = accepted.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                accepted_conns.fetch_add(1, Ordering::SeqCst);
                let guard = OpenGuard::new(open_conns.clone());
                let behavior = behavior.clone();
                tokio::spawn(async move {
                    let _guard = guard;
                    serve(stream, behavior).await;
                });
            }
        });

        Self { addr, open, accepted }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn open_connections(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }

    pub fn accepted_connections(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    /// Waits until every accepted connection has been closed again
    pub async fn wait_until_idle(&self, within: Duration) -> bool {
        tokio::time::timeout(within, async {
            while self.open_connections() > 0 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .is_ok()
    }
}

/// Returns a URL on a local port nobody listens on
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind free port");
    let addr = listener.local_addr().expect("free port address");
    drop(listener);
    format!("http://{addr}/")
}

async fn serve(mut stream: TcpStream, behavior: Behavior) {
    while let Some((headers, body)) = read_request(&mut stream).await {
        match &behavior {
            Behavior::Respond { content_type, body } => {
                write_response(&mut stream, content_type, body).await;
            }
            Behavior::Delay(delay) => {
                let mut scratch = [0u8; 1];
                let gave_up = tokio::select! {
                    _ = tokio::time::sleep(*delay) => false,
                    _ = stream.read(&mut scratch) => true,
                };
                if gave_up {
                    return;
                }
                write_response(&mut stream, "application/json", "{}").await;
            }
            Behavior::HangUp => return,
            Behavior::EchoForm => {
                let fields: HashMap<String, String> = url::form_urlencoded::parse(&body).into_owned().collect();
                let json = serde_json::to_string(&fields).expect("form as json");
                write_response(&mut stream, "text/html", &json).await;
            }
            Behavior::EchoHeaders => {
                let json = serde_json::to_string(&headers).expect("headers as json");
                write_response(&mut stream, "application/json", &json).await;
            }
            Behavior::Raw(bytes) => {
                let _ = stream.write_all(bytes).await;
            }
            Behavior::StallBody => {
                let head = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"partial\":";
                let _ = stream.write_all(head.as_bytes()).await;
                let _ = stream.flush().await;

                let mut scratch = [0u8; 1];
                let _ = stream.read(&mut scratch).await;
                return;
            }
        }
    }
}

async fn read_request(stream: &mut TcpStream) -> Option<(HashMap<String, String>, Vec<u8>)> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let headers: HashMap<String, String> = head
        .lines()
        .skip(1)
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();
    let len = headers
        .get("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = buf[head_end..].to_vec();
    while body.len() < len {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(len);

    Some((headers, body))
}

async fn write_response(stream: &mut TcpStream, content_type: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\n\r\n{}",
        content_type,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes()).await;
}
