//! HTTP surface: venue listing, venue lookup, swap estimation and health.

pub mod routes;
pub mod server;
pub mod state;
pub mod utils;

pub use server::{build_app, start_server};
pub use state::AppState;
pub use utils::ApiError;
