//! REST routes over the decision store

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use kpisim_common::{Decisions, KpiSimError, Kpis, Scenario};
use kpisim_engine::KpiComparison;
use kpisim_store::{DecisionStore, StoreSnapshot};
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<DecisionStore>>,
    started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: DecisionStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            started_at: Utc::now(),
        }
    }
}

/// Store errors and malformed bodies mapped onto HTTP responses
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl From<KpiSimError> for ApiError {
    fn from(err: KpiSimError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        ApiError {
            status,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(status = %self.status, error = %self.message, "request rejected");
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

#[derive(Deserialize)]
struct ScenarioRequest {
    scenario: String,
}

#[derive(Deserialize)]
struct DecisionRequest {
    value: Value,
}

/// Build the API router
pub fn router(state: AppState) -> Router {
    // CORS layer to allow frontend connections from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { Json(json!({"status": "healthy"})) }))
        .route("/api/v1/version", get(version))
        .route("/api/v1/state", get(get_state))
        .route("/api/v1/kpis", get(get_kpis))
        .route("/api/v1/kpis/comparison", get(get_comparison))
        .route("/api/v1/kpis/adjustments", get(get_adjustments))
        .route("/api/v1/scenario", get(get_scenario).put(put_scenario))
        .route("/api/v1/decisions", get(get_decisions))
        .route("/api/v1/decisions/:scenario/:field", put(put_decision))
        .route("/api/v1/decisions/:scenario/:field/toggle", post(toggle_decision))
        .route("/api/v1/log", get(get_log))
        .route("/api/v1/reset", post(reset))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn version(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "service": "kpisim-service",
        "version": kpisim_common::VERSION,
        "description": "Before/after automation KPI simulator",
        "started_at": state.started_at.to_rfc3339(),
    }))
}

async fn get_state(State(state): State<AppState>) -> Json<StoreSnapshot> {
    Json(state.store.lock().snapshot())
}

async fn get_kpis(State(state): State<AppState>) -> Json<Kpis> {
    Json(state.store.lock().kpis())
}

async fn get_comparison(State(state): State<AppState>) -> Json<KpiComparison> {
    Json(state.store.lock().comparison())
}

async fn get_adjustments(State(state): State<AppState>) -> Json<Value> {
    let store = state.store.lock();
    let adjustments: Vec<_> = store
        .adjustments()
        .into_iter()
        .map(|a| {
            json!({
                "field": a.field,
                "delta": a.delta,
                "decision": a.decision,
                "value": a.value,
                "description": a.description(),
            })
        })
        .collect();

    Json(json!({
        "scenario": store.scenario(),
        "adjustments": adjustments,
    }))
}

async fn get_scenario(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "scenario": state.store.lock().scenario() }))
}

async fn put_scenario(
    State(state): State<AppState>,
    body: std::result::Result<Json<ScenarioRequest>, JsonRejection>,
) -> ApiResult<StoreSnapshot> {
    let Json(request) = body?;
    let scenario: Scenario = request.scenario.parse().map_err(KpiSimError::from)?;
    Ok(Json(state.store.lock().set_scenario(scenario)))
}

async fn get_decisions(State(state): State<AppState>) -> Json<Decisions> {
    Json(*state.store.lock().decisions())
}

async fn put_decision(
    State(state): State<AppState>,
    Path((scenario, field)): Path<(String, String)>,
    body: std::result::Result<Json<DecisionRequest>, JsonRejection>,
) -> ApiResult<StoreSnapshot> {
    let Json(request) = body?;
    let snapshot = state
        .store
        .lock()
        .set_decision_by_key(&scenario, &field, &request.value)?;
    Ok(Json(snapshot))
}

async fn toggle_decision(
    State(state): State<AppState>,
    Path((scenario, field)): Path<(String, String)>,
) -> ApiResult<StoreSnapshot> {
    let snapshot = state.store.lock().toggle_decision_by_key(&scenario, &field)?;
    Ok(Json(snapshot))
}

async fn get_log(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "entries": state.store.lock().log() }))
}

async fn reset(State(state): State<AppState>) -> Json<StoreSnapshot> {
    Json(state.store.lock().reset())
}
