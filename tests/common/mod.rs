#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{Duration, Utc};
use fda_dash::config::Settings;
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const DRUGS: [&str; 3] = ["ASPIRIN", "IBUPROFEN", "LIPITOR"];

/// `n` openFDA-shaped records, one per day going back from yesterday.
pub fn fixture(n: usize) -> Value {
    let today = Utc::now().date_naive();
    let results: Vec<Value> = (0..n)
        .map(|i| {
            let date = today - Duration::days(1 + i as i64);
            json!({
                "safetyreportid": format!("{}", 1000 + i),
                "receiptdate": date.format("%Y%m%d").to_string(),
                "patient": {
                    "drug": [
                        {"medicinalproduct": DRUGS[i % DRUGS.len()], "drugcharacterization": "1"},
                        {"medicinalproduct": "OMEPRAZOLE", "drugcharacterization": "3"}
                    ],
                    "reaction": [{"reactionmeddrapt": "Nausea"}]
                }
            })
        })
        .collect();
    json!({ "meta": {}, "results": results })
}

#[derive(Clone, Default)]
pub struct Upstream {
    pub hits: Arc<AtomicUsize>,
}

impl Upstream {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn ok(
    State(up): State<Upstream>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    up.hits.fetch_add(1, Ordering::SeqCst);
    let limit = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(1000);
    Json(fixture(limit))
}

/// Ignores `limit` and always answers with 150 records.
async fn flood(State(up): State<Upstream>) -> Json<Value> {
    up.hits.fetch_add(1, Ordering::SeqCst);
    Json(fixture(150))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": {"code": "NOT_FOUND", "message": "No matches found!"}})),
    )
}

async fn boom() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

async fn garbage() -> impl IntoResponse {
    (StatusCode::OK, "{\"results\": [ {\"receiptdate\": ")
}

/// Fake openFDA: `/ok`, `/flood`, `/missing` (404), `/boom` (500), `/garbage`.
pub async fn spawn_upstream() -> (SocketAddr, Upstream) {
    let upstream = Upstream::default();
    let router = Router::new()
        .route("/ok", get(ok))
        .route("/flood", get(flood))
        .route("/missing", get(not_found))
        .route("/boom", get(boom))
        .route("/garbage", get(garbage))
        .with_state(upstream.clone());
    (spawn(router).await, upstream)
}

pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    addr
}

pub fn settings_for(addr: SocketAddr, path: &str) -> Settings {
    Settings {
        base_url: format!("http://{addr}{path}"),
        http_timeout_secs: 5,
        ..Settings::default()
    }
}
