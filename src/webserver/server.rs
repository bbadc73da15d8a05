/// Axum webserver lifecycle: router assembly, bind, graceful shutdown
use anyhow::{Context, Result};
use axum::Router;
use log::info;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::webserver::{routes, state::AppState};

/// Build the Axum application with all routes and middleware
pub fn build_app(state: Arc<AppState>) -> Router {
    routes::create_router(state).layer(CorsLayer::permissive())
}

/// Serves until `shutdown` resolves. `host` may be an IP literal or a resolvable hostname.
pub async fn start_server<F>(host: &str, port: u16, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app(state);

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", host, port))?;
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!("Venue service listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    info!("Webserver stopped gracefully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::VenueService;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::new(Arc::new(VenueService::fallback_only()), "venue-service"))
    }

    #[tokio::test]
    async fn test_binds_hostname() {
        start_server("localhost", 0, state(), async {}).await.unwrap();
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_an_error() {
        let err = start_server("no-such-host.invalid", 0, state(), async {}).await.unwrap_err();
        assert!(err.to_string().contains("Failed to bind to no-such-host.invalid:0"));
    }
}
