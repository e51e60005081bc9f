//! Fake aeronautical data endpoint for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /feed` with a configurable status, content type
//! and body, and records the `Authorization` header of every request.
//!
//! # Example
//!
//! ```rust,no_run
//! let api = FakeFeedApi::start().await.unwrap();
//! api.respond(200, "application/json", JSON_FEED).await;
//!
//! // Point DATA_URL at api.feed_url()
//! let url = api.feed_url();
//! ```

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// State shared between the router and test code.
struct ApiState {
    status: StatusCode,
    content_type: String,
    body: String,
    /// `Authorization` header of each request received, in order.
    authorizations: Vec<Option<String>>,
}

impl Default for ApiState {
    fn default() -> Self {
        Self {
            status: StatusCode::OK,
            content_type: "application/json".to_string(),
            body: r#"{"data": []}"#.to_string(),
            authorizations: Vec::new(),
        }
    }
}

/// Handle to the running fake endpoint.
pub struct FakeFeedApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeFeedApi {
    /// Start the server on a random port. Returns once the server is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/feed", get(serve_feed))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// URL of the feed endpoint (e.g. `http://127.0.0.1:PORT/feed`).
    pub fn feed_url(&self) -> String {
        format!("http://{}/feed", self.addr)
    }

    /// Configure the next responses.
    pub async fn respond(&self, status: u16, content_type: &str, body: &str) {
        let mut state = self.state.lock().await;
        state.status = StatusCode::from_u16(status).unwrap();
        state.content_type = content_type.to_string();
        state.body = body.to_string();
    }

    /// `Authorization` headers seen so far.
    pub async fn authorizations(&self) -> Vec<Option<String>> {
        self.state.lock().await.authorizations.clone()
    }
}

/// An address nothing listens on.
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/feed")
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn serve_feed(
    State(state): State<Arc<Mutex<ApiState>>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let mut state = state.lock().await;
    state.authorizations.push(
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    );

    (
        state.status,
        [(header::CONTENT_TYPE, state.content_type.clone())],
        state.body.clone(),
    )
}
