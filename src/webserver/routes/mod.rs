use axum::Router;
use std::sync::Arc;

use crate::webserver::state::AppState;

pub mod status;
pub mod swaps;
pub mod venues;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(venues::routes())
        .merge(swaps::routes())
        .merge(status::routes())
        .with_state(state)
}
