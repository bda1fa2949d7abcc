//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, Response, StatusCode},
    Router,
};
use futures_util::stream;
use tempfile::TempDir;
use tokio::net::TcpListener;

use vcsky_proxy::config::{AssetsConfig, ProxyConfig, RouteConfig};
use vcsky_proxy::{HttpServer, Shutdown};

/// Body served by `/vcsky/models/foo.bin`.
pub const MODEL_BYTES: &[u8] = b"\x01\x02\x03";

/// Body served by `/vcsky/encoded`; brotli-looking bytes that must not be touched.
pub const ENCODED_BYTES: &[u8] = b"\x1b\x03\x00\xf8\xa5\x00BRBYTES";

pub const INDEX_HTML: &str = "<!doctype html><title>vcsky</title>";
pub const APP_JS: &str = "console.log('vcsky');";

/// A request as the mock upstream saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Mock CDN serving both route prefixes from one listener.
#[derive(Clone)]
pub struct MockUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
    /// Set once the `/vcsky/stream` body has been dropped by the upstream server.
    pub stream_released: Arc<AtomicBool>,
    pub flaky_hits: Arc<AtomicUsize>,
}

impl MockUpstream {
    /// Origin standing in for the `/vcsky/` CDN.
    pub fn vcsky_origin(&self) -> String {
        format!("http://{}/vcsky/", self.addr)
    }

    /// Origin standing in for the `/vcbr/` CDN.
    pub fn vcbr_origin(&self) -> String {
        format!("http://{}/br/", self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.requests().pop().expect("upstream saw no request")
    }
}

struct ReleaseFlag(Arc<AtomicBool>);

impl Drop for ReleaseFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Start the mock upstream on an ephemeral port.
pub async fn start_mock_upstream() -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let mock = MockUpstream {
        addr: listener.local_addr().unwrap(),
        requests: Arc::new(Mutex::new(Vec::new())),
        stream_released: Arc::new(AtomicBool::new(false)),
        flaky_hits: Arc::new(AtomicUsize::new(0)),
    };

    let state = mock.clone();
    let app = Router::new().fallback(move |request: Request<Body>| {
        let state = state.clone();
        async move { respond(state, request).await }
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    mock
}

async fn respond(mock: MockUpstream, request: Request<Body>) -> Response<Body> {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let path = parts.uri.path().to_string();
    mock.requests.lock().unwrap().push(Recorded {
        method: parts.method.clone(),
        path: path.clone(),
        query: parts.uri.query().map(str::to_string),
        headers: parts.headers.clone(),
        body: body.clone(),
    });

    let builder = Response::builder().header("x-upstream", "mock");
    let response = match path.as_str() {
        "/vcsky/models/foo.bin" => builder
            .status(StatusCode::OK)
            .header("content-type", "application/octet-stream")
            .body(Body::from(MODEL_BYTES)),
        "/vcsky/encoded" => builder
            .status(StatusCode::OK)
            .header("content-type", "application/wasm")
            .header("content-encoding", "br")
            .header("x-content-encoding", "br")
            .body(Body::from(ENCODED_BYTES)),
        "/vcsky/echo" => builder
            .status(StatusCode::CREATED)
            .header("content-type", "application/octet-stream")
            .body(Body::from(body)),
        "/vcsky/large" => builder
            .status(StatusCode::OK)
            .body(Body::from(large_payload())),
        "/vcsky/redirect" => builder
            .status(StatusCode::FOUND)
            .header("location", "/vcsky/models/foo.bin")
            .body(Body::empty()),
        "/vcsky/flaky" => {
            mock.flaky_hits.fetch_add(1, Ordering::SeqCst);
            builder
                .status(StatusCode::SERVICE_UNAVAILABLE)
                .body(Body::from("try later"))
        }
        "/vcsky/slow" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            builder.status(StatusCode::OK).body(Body::from("late"))
        }
        "/vcsky/stream" => {
            let flag = ReleaseFlag(mock.stream_released.clone());
            let chunks = stream::unfold((0u64, flag), |(n, flag)| async move {
                if n > 0 {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                }
                let chunk = Bytes::from(vec![b'x'; 16 * 1024]);
                Some((Ok::<_, std::io::Error>(chunk), (n + 1, flag)))
            });
            builder.status(StatusCode::OK).body(Body::from_stream(chunks))
        }
        _ => builder
            .status(StatusCode::NOT_FOUND)
            .body(Body::from("not on this cdn")),
    };
    response.unwrap()
}

/// 1 MiB of non-repeating-looking bytes.
pub fn large_payload() -> Vec<u8> {
    (0..1024 * 1024u32).map(|i| (i.wrapping_mul(31) % 251) as u8).collect()
}

/// Static tree with an index page and one script.
pub fn static_root() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
    std::fs::write(dir.path().join("app.js"), APP_JS).unwrap();
    dir
}

/// Proxy configuration pointing both prefixes at the mock upstream.
pub fn proxy_config(mock: &MockUpstream, assets: &TempDir) -> ProxyConfig {
    let mut config = ProxyConfig::with_bind("127.0.0.1", 0);
    config.routes = vec![
        RouteConfig::new("vcsky", "/vcsky/", mock.vcsky_origin()),
        RouteConfig::new("vcbr", "/vcbr/", mock.vcbr_origin()),
    ];
    config.assets = AssetsConfig::rooted_at(assets.path());
    config.upstream.system_proxy = false;
    config
}

/// Run the proxy on an ephemeral port.
pub async fn start_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    (addr, shutdown)
}

/// Test client that never follows redirects or uses an env proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
