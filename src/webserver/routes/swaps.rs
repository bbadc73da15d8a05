use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    routing::post,
    Json, Router,
};
use log::{debug, warn};
use serde::Deserialize;
use std::sync::Arc;

use crate::estimator::{DEFAULT_SOURCE_TOKEN, DEFAULT_TARGET_TOKEN};
use crate::metrics;
use crate::webserver::{state::AppState, utils::success_response, ApiError};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateSwapRequest {
    pub venue: Option<String>,
    pub amount: Option<f64>,
    pub source_token: Option<String>,
    pub target_token: Option<String>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/estimate-swap", post(estimate_swap))
}

/// POST /estimate-swap
async fn estimate_swap(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<EstimateSwapRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected estimate request: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;

    let (venue, amount) = match (request.venue.as_deref().map(str::trim), request.amount) {
        (Some(venue), Some(amount)) if !venue.is_empty() && amount != 0.0 => (venue, amount),
        _ => return Err(ApiError::MissingParameters),
    };
    if !amount.is_finite() || amount < 0.0 {
        return Err(ApiError::BadRequest(format!(
            "amount must be a positive number, got {}",
            amount
        )));
    }

    let source = request.source_token.as_deref().unwrap_or(DEFAULT_SOURCE_TOKEN);
    let target = request.target_token.as_deref().unwrap_or(DEFAULT_TARGET_TOKEN);

    let estimate = state.estimator.estimate(venue, amount, source, target);
    if !estimate.is_finite() {
        return Err(ApiError::BadRequest(format!(
            "amount {} is too large to estimate",
            amount
        )));
    }
    if !estimate.is_exact() {
        debug!("Estimate for {} {}/{} used defaults: {:?}", venue, source, target, estimate.warnings);
    }
    metrics::increment_swap_estimate(!estimate.is_exact());

    Ok(success_response(estimate))
}
