//! Axum router and HTTP handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use dosecalc_core::error::CalcError;
use dosecalc_core::traits::SnapshotStore;
use dosecalc_core::types::{CalculationForm, InputSnapshot};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, warn};

use crate::AppState;

// Embed the web UI at compile time.
const INDEX_HTML: &str = include_str!("static/index.html");

// ── Error helper ─────────────────────────────────────────────────────────────

/// Failure reply: `{"success": false, "error": ...}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "success": false, "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<CalcError> for ApiError {
    fn from(e: CalcError) -> Self {
        ApiError::bad_request(e.to_string())
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

// ── Router ───────────────────────────────────────────────────────────────────

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(web_ui))
        .route("/api/calculate", post(calculate))
        .route("/api/nuclides", get(nuclides))
        .route("/api/current-time", get(current_time))
        .route("/api/saved-data", get(saved_data))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// Serve the embedded web UI.
async fn web_ui() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// ── /api/calculate ───────────────────────────────────────────────────────────

/// `POST /api/calculate` — decay the initial activity to the target time.
///
/// The body is decoded by hand so malformed JSON gets the same failure shape
/// as any other bad input.
async fn calculate(State(s): State<AppState>, body: Bytes) -> ApiResult<Value> {
    let form: CalculationForm = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Rejected calculation body");
        ApiError::bad_request(format!("invalid request body: {e}"))
    })?;

    if let Some(store) = &s.store {
        let snapshot = InputSnapshot::from_form(&form, s.clock.now().to_rfc3339());
        persist_snapshot(store.clone(), snapshot).await;
    }

    let result = s.calculator.evaluate(&form).map_err(|e| {
        warn!(error = %e, "Calculation failed");
        ApiError::from(e)
    })?;

    debug!(
        nuclide = form.nuclide.as_deref().unwrap_or_default(),
        elapsed_minutes = result.elapsed_minutes,
        required_volume = result.required_volume,
        "Calculation served"
    );

    Ok(Json(json!({ "success": true, "result": result })))
}

/// Save without ever failing the caller.
async fn persist_snapshot(store: Arc<dyn SnapshotStore>, snapshot: InputSnapshot) {
    match tokio::task::spawn_blocking(move || store.save(&snapshot)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(error = %e, "Failed to save input snapshot"),
        Err(e) => warn!(error = %e, "Snapshot save task failed"),
    }
}

// ── /api/saved-data ──────────────────────────────────────────────────────────

/// `GET /api/saved-data` — last submitted form, or `{}`.
async fn saved_data(State(s): State<AppState>) -> Json<Value> {
    let Some(store) = s.store.clone() else {
        return Json(json!({}));
    };

    let loaded = match tokio::task::spawn_blocking(move || store.load()).await {
        Ok(Ok(snapshot)) => snapshot,
        Ok(Err(e)) => {
            warn!(error = %e, "Failed to load input snapshot");
            None
        }
        Err(e) => {
            warn!(error = %e, "Snapshot load task failed");
            None
        }
    };

    Json(
        loaded
            .and_then(|snap| serde_json::to_value(snap).ok())
            .unwrap_or_else(|| json!({})),
    )
}

// ── Auxiliary ────────────────────────────────────────────────────────────────

/// `GET /api/nuclides` — display names and half-lives by code.
async fn nuclides(State(s): State<AppState>) -> Json<Value> {
    Json(json!({
        "nuclides":   s.nuclides.display_names(),
        "half_lives": s.nuclides.half_lives(),
    }))
}

/// `GET /api/current-time` — `HH:MM` in the configured zone.
async fn current_time(State(s): State<AppState>) -> Json<Value> {
    Json(json!({
        "current_time": s.clock.now().format("%H:%M").to_string(),
        "timezone":     s.clock.zone_name(),
    }))
}

/// `GET /health` — liveness check.
async fn health(State(s): State<AppState>) -> Json<Value> {
    Json(json!({
        "status":    "healthy",
        "timestamp": s.clock.now().to_rfc3339(),
    }))
}
