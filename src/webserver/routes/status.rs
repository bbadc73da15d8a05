use axum::{extract::State, response::Response, routing::get, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::service::ServiceMode;
use crate::webserver::{state::AppState, utils::success_response};

/// Simple health check response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    /// `live` with an RPC source, `fallback` otherwise
    pub implementation: ServiceMode,
    /// Seconds since the last cache write, `null` when nothing is cached
    pub cache_age: Option<f64>,
    pub uptime_seconds: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: &'static str,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}

/// GET /health
async fn health_check(State(state): State<Arc<AppState>>) -> Response {
    let response = HealthResponse {
        status: "ok",
        service: state.service_name.clone(),
        implementation: state.service.mode(),
        cache_age: state.service.cache_age().map(|age| age.as_secs_f64()),
        uptime_seconds: state.uptime_seconds(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
    };

    success_response(response)
}
