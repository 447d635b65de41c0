//! In-process stand-in for the Geocodr service

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
enum MockBody {
    Json(Value),
    Raw(String),
}

#[derive(Clone)]
struct MockState {
    body: MockBody,
    delay: Arc<Mutex<Duration>>,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

pub(crate) struct MockGeocodr {
    addr: SocketAddr,
    state: MockState,
}

impl MockGeocodr {
    /// Serve `body` as JSON on `/query`
    pub(crate) async fn start(body: Value) -> Self {
        Self::serve(MockBody::Json(body)).await
    }

    /// Serve `body` verbatim as HTML on `/query`
    pub(crate) async fn start_raw(body: &str) -> Self {
        Self::serve(MockBody::Raw(body.to_string())).await
    }

    async fn serve(body: MockBody) -> Self {
        let state = MockState {
            body,
            delay: Arc::new(Mutex::new(Duration::ZERO)),
            queries: Arc::new(Mutex::new(Vec::new())),
        };
        let app = Router::new()
            .route("/query", get(handle_query))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock listener");
        let addr = listener.local_addr().expect("mock listener address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        Self { addr, state }
    }

    /// Hold every reply back for `delay`
    pub(crate) fn with_delay(self, delay: Duration) -> Self {
        *self.state.delay.lock().unwrap() = delay;
        self
    }

    pub(crate) fn url(&self) -> String {
        format!("http://{}/query", self.addr)
    }

    /// Query parameters of the most recent request
    pub(crate) fn last_query(&self) -> Option<HashMap<String, String>> {
        self.state.queries.lock().unwrap().last().cloned()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.state.queries.lock().unwrap().len()
    }

    /// Wait until at least `count` requests arrived
    pub(crate) async fn wait_for_requests(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.request_count() < count {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("requests reached the mock server");
    }
}

async fn handle_query(
    State(state): State<MockState>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    state.queries.lock().unwrap().push(query);

    let delay = *state.delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    match state.body {
        MockBody::Json(body) => Json(body).into_response(),
        MockBody::Raw(body) => ([(header::CONTENT_TYPE, "text/html")], body).into_response(),
    }
}
