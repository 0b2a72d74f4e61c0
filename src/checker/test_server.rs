// src/checker/test_server.rs
// =============================================================================
// A tiny HTTP server for tests, so probes never depend on the internet.
//
// Routes:
//   /ok            -> 200
//   /fail          -> 500
//   /missing       -> 404
//   /slow          -> 200 after 3 seconds
//   /needs-header  -> 200 if "x-probe" is present, 400 otherwise
//   /ua            -> 200 if User-Agent is HealthChecker/1.0, 403 otherwise
//   /loop          -> 307 back to itself, forever
// =============================================================================

use axum::http::{HeaderMap, StatusCode};
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

pub struct StubServer {
    addr: SocketAddr,
    handle: tokio::task::JoinHandle<()>,
}

impl StubServer {
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/fail", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(3)).await;
                    "late"
                }),
            )
            .route(
                "/needs-header",
                get(|headers: HeaderMap| async move {
                    if headers.contains_key("x-probe") {
                        StatusCode::OK
                    } else {
                        StatusCode::BAD_REQUEST
                    }
                }),
            )
            .route(
                "/ua",
                get(|headers: HeaderMap| async move {
                    match headers.get("user-agent").and_then(|v| v.to_str().ok()) {
                        Some("HealthChecker/1.0") => StatusCode::OK,
                        _ => StatusCode::FORBIDDEN,
                    }
                }),
            )
            .route("/loop", get(|| async { Redirect::temporary("/loop") }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, handle }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// Returns a URL on a local port that nothing is listening on
pub async fn refused_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}
