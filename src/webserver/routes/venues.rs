use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::debug;
use serde::Deserialize;
use std::sync::Arc;

use crate::service::VenueOrigin;
use crate::webserver::{state::AppState, utils::success_response, ApiError};

/// Response header naming where a venue list came from.
pub const VENUE_SOURCE_HEADER: &str = "x-venue-source";

#[derive(Debug, Default, Deserialize)]
pub struct VenueQuery {
    /// Only the literal `true` forces the fallback table
    pub force_fallback: Option<String>,
}

impl VenueQuery {
    fn forced(&self) -> bool {
        self.force_fallback.as_deref() == Some("true")
    }
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/:id", get(get_venue))
}

/// GET /venues
async fn list_venues(State(state): State<Arc<AppState>>, Query(query): Query<VenueQuery>) -> Response {
    let snapshot = if query.forced() {
        debug!("Using fallback venue data (forced)");
        state.service.fallback_venues()
    } else {
        state.service.venues().await
    };
    venues_response(snapshot.origin, &snapshot.venues)
}

fn venues_response(origin: VenueOrigin, venues: &[crate::types::Venue]) -> Response {
    ([(VENUE_SOURCE_HEADER, origin.as_str())], Json(venues)).into_response()
}

/// GET /venues/:id
async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<VenueQuery>,
) -> Result<Response, ApiError> {
    if query.forced() {
        return state
            .service
            .fallback_venue_by_id(&id)
            .map(success_response)
            .ok_or_else(|| ApiError::NotFound("Venue not found in fallback data".to_string()));
    }

    state
        .service
        .venue_by_id(&id)
        .await
        .map(success_response)
        .ok_or_else(|| ApiError::NotFound("Venue not found".to_string()))
}
