mod common;

use fda_dash::api::{self, AppState};
use reqwest::StatusCode;
use serde_json::Value;

async fn spawn_app(upstream_path: &str) -> String {
    let (upstream, _) = common::spawn_upstream().await;
    let state = AppState::new(common::settings_for(upstream, upstream_path)).unwrap();
    let addr = common::spawn(api::router(state)).await;
    format!("http://{addr}")
}

#[tokio::test]
async fn top_drugs_route_returns_counts() {
    let base = spawn_app("/ok").await;
    let resp = reqwest::get(format!("{base}/api/top-drugs?limit=9")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["sample_size"], 9);
    let drugs = body["drugs"].as_array().unwrap();
    assert_eq!(drugs.len(), 3);
    assert_eq!(drugs[0]["drug_name"], "ASPIRIN");
    assert_eq!(drugs[0]["count"], 3);
}

#[tokio::test]
async fn search_route_reports_span_and_roles() {
    let base = spawn_app("/ok").await;
    let resp = reqwest::get(format!("{base}/api/search?drug=omeprazole&limit=6"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["total"], 6);
    assert_eq!(body["roles"][0]["role"], "concomitant");
    assert_eq!(body["roles"][0]["count"], 6);
    assert_eq!(body["recent"].as_array().unwrap().len(), 6);
    assert!(body["span"]["first"].is_string());
}

#[tokio::test]
async fn trend_route_has_one_point_per_day() {
    let base = spawn_app("/ok").await;
    let resp = reqwest::get(format!("{base}/api/trend?window_days=30&limit=10"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let points: Vec<Value> = resp.json().await.unwrap();
    assert_eq!(points.len(), 31);
    let total: u64 = points.iter().map(|p| p["count"].as_u64().unwrap()).sum();
    assert_eq!(total, 10);
}

#[tokio::test]
async fn missing_drug_is_bad_request() {
    let base = spawn_app("/ok").await;
    let resp = reqwest::get(format!("{base}/api/roles")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "invalid_argument");
}

#[tokio::test]
async fn negative_window_is_bad_request() {
    let base = spawn_app("/ok").await;
    let resp = reqwest::get(format!("{base}/api/trend?window_days=-5")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_window_is_bad_request() {
    let base = spawn_app("/ok").await;
    let resp = reqwest::get(format!("{base}/api/trend?window_days=90000000"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "invalid_argument");
}

#[tokio::test]
async fn upstream_failure_is_bad_gateway() {
    let base = spawn_app("/boom").await;
    let resp = reqwest::get(format!("{base}/api/top-drugs")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "fetch_error");
}

#[tokio::test]
async fn health_is_ok() {
    let base = spawn_app("/ok").await;
    let text = reqwest::get(format!("{base}/health")).await.unwrap().text().await.unwrap();
    assert_eq!(text, "ok");
}
