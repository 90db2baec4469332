//! HTTP control surface consumed by the web front end.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;
use watchsync_config::{normalize_region, ConfigError, ConfigStore, StoreError, SyncConfig};
use watchsync_core::{SyncRunner, TriggerOutcome};
use watchsync_models::{LogEntry, SyncStatus};

#[derive(Clone)]
pub struct ApiState {
    pub config_store: Arc<dyn ConfigStore>,
    pub runner: SyncRunner,
}

pub enum ApiError {
    Store(StoreError),
    InvalidConfig(ConfigError),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        ApiError::Store(e)
    }
}

impl From<ConfigError> for ApiError {
    fn from(e: ConfigError) -> Self {
        ApiError::InvalidConfig(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Store(e) => {
                error!(error = %e, "Config store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ApiError::InvalidConfig(e) => (StatusCode::BAD_REQUEST, e.to_string()),
        };
        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/config", get(get_config).post(set_config))
        .route("/api/logs", get(get_logs))
        .route("/api/sync", post(trigger_sync))
        .route("/api/status", get(get_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn get_config(State(state): State<ApiState>) -> Result<Json<SyncConfig>, ApiError> {
    Ok(Json(state.config_store.load()?))
}

/// Replaces the whole record
async fn set_config(
    State(state): State<ApiState>,
    Json(mut config): Json<SyncConfig>,
) -> Result<Json<serde_json::Value>, ApiError> {
    config.region = normalize_region(&config.region)?;
    state.config_store.save(&config)?;
    state.runner.log().success("Configuration updated");
    Ok(Json(json!({ "success": true })))
}

async fn get_logs(State(state): State<ApiState>) -> Json<Vec<LogEntry>> {
    Json(state.runner.log().entries())
}

async fn trigger_sync(State(state): State<ApiState>) -> (StatusCode, Json<serde_json::Value>) {
    match state.runner.trigger() {
        TriggerOutcome::Started => (
            StatusCode::ACCEPTED,
            Json(json!({ "success": true, "message": "Sync started" })),
        ),
        TriggerOutcome::AlreadyRunning => (
            StatusCode::CONFLICT,
            Json(json!({ "success": false, "message": "Sync already in progress" })),
        ),
    }
}

async fn get_status(State(state): State<ApiState>) -> Json<SyncStatus> {
    Json(state.runner.status())
}
