//! Shared test helpers for E2E and property tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::DateTime;
use dosecalc_core::nuclide::NuclideTable;
use dosecalc_core::traits::SnapshotStore;
use dosecalc_decay::DecayEngine;
use dosecalc_server_lib::clock::FrozenClock;
use dosecalc_server_lib::{AppState, router};
use serde_json::Value;
use tower::ServiceExt;

/// Instant every test clock is frozen at: 06:45 in UTC+8.
pub const FROZEN_AT: &str = "2026-05-04T06:45:00+08:00";

/// App state with the builtin nuclides and a frozen clock.
pub fn test_state(store: Option<Arc<dyn SnapshotStore>>) -> AppState {
    let nuclides = Arc::new(NuclideTable::builtin());
    let at = DateTime::parse_from_rfc3339(FROZEN_AT).unwrap();
    AppState {
        calculator: Arc::new(DecayEngine::new(nuclides.clone())),
        nuclides,
        clock: Arc::new(FrozenClock::new(at, "Asia/Shanghai")),
        store,
    }
}

pub fn test_app(store: Option<Arc<dyn SnapshotStore>>) -> Router {
    router(test_state(store))
}

/// Send one request and decode the JSON reply.
pub async fn send_json(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Send one request and return the raw body as text.
pub async fn send_text(app: &Router, req: Request<Body>) -> (StatusCode, String) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

/// `POST /api/calculate` with a JSON body.
pub fn calculate_req(body: &Value) -> Request<Body> {
    raw_calculate_req(body.to_string())
}

/// `POST /api/calculate` with an arbitrary body.
pub fn raw_calculate_req(body: impl Into<String>) -> Request<Body> {
    Request::post("/api/calculate")
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

/// `|a - b| < tol`, with a readable failure message.
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {expected} ± {tol}, got {actual}"
    );
}
