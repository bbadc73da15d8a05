/// Shared application state for the webserver
use std::sync::Arc;

use crate::estimator::SwapEstimator;
use crate::service::VenueService;

/// Shared application state passed to all route handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<VenueService>,
    pub estimator: Arc<SwapEstimator>,
    /// Name reported by `/health`
    pub service_name: String,
    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(service: Arc<VenueService>, service_name: impl Into<String>) -> Self {
        Self {
            service,
            estimator: Arc::new(SwapEstimator::default()),
            service_name: service_name.into(),
            startup_time: chrono::Utc::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}
