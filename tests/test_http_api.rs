//! HTTP API integration tests
//!
//! Tests cover:
//! - Venue listing from live, cached and fallback sources
//! - Venue lookup by id
//! - Swap estimation and request validation
//! - Health reporting
//!
//! Requests go straight to the router through `tower::ServiceExt::oneshot`; no socket is bound.

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use venue_service::fallback::fallback_venues;
use venue_service::webserver::{build_app, AppState};
use venue_service::{Chain, Protocol, Venue, VenueService, VenueSource};

struct StubSource {
    venues: Vec<Venue>,
    calls: AtomicUsize,
}

#[async_trait]
impl VenueSource for StubSource {
    async fn fetch(&self) -> Vec<Venue> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.venues.clone()
    }
}

fn live_venue() -> Venue {
    Venue {
        id: "uniswap-v3-3000".to_string(),
        name: "Uniswap V3 (0.3%)".to_string(),
        max: 42_000,
        fee: 0.003,
        slippage: 0.0025,
        chain: Chain::Ethereum,
        protocol: Protocol::UniswapV3,
        tvl: 840_000,
        supported_tokens: vec!["ETH".to_string(), "USDC".to_string()],
    }
}

fn app_with_source(venues: Vec<Venue>) -> (Router, Arc<StubSource>) {
    let source = Arc::new(StubSource { venues, calls: AtomicUsize::new(0) });
    let service = VenueService::new(source.clone(), Duration::from_secs(300));
    let state = AppState::new(Arc::new(service), "venue-service");
    (build_app(Arc::new(state)), source)
}

fn fallback_app() -> Router {
    let state = AppState::new(Arc::new(VenueService::fallback_only()), "venue-service");
    build_app(Arc::new(state))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let source = response
        .headers()
        .get("x-venue-source")
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, source, serde_json::from_slice(&bytes).unwrap())
}

async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, &body.to_string()).await
}

fn as_venues(body: Value) -> Vec<Venue> {
    serde_json::from_value(body).unwrap()
}

/// Forced fallback ignores a warm cache
#[tokio::test]
async fn test_force_fallback_returns_fallback_table() {
    let (app, source) = app_with_source(vec![live_venue()]);
    get(&app, "/venues").await;

    let (status, origin, body) = get(&app, "/venues?force_fallback=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(origin.as_deref(), Some("fallback"));
    assert_eq!(as_venues(body), fallback_venues());
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

/// Anything but the literal `true` is not a force
#[tokio::test]
async fn test_force_fallback_requires_literal_true() {
    let (app, _) = app_with_source(vec![live_venue()]);
    let (_, origin, _) = get(&app, "/venues?force_fallback=1").await;
    assert_eq!(origin.as_deref(), Some("live"));
}

/// Second request within the TTL is served from cache with identical content
#[tokio::test]
async fn test_cached_venues_are_identical() {
    let (app, source) = app_with_source(vec![live_venue()]);

    let (_, first_origin, first) = get(&app, "/venues").await;
    let (_, second_origin, second) = get(&app, "/venues").await;

    assert_eq!(first_origin.as_deref(), Some("live"));
    assert_eq!(second_origin.as_deref(), Some("cache"));
    assert_eq!(first, second);
    assert_eq!(as_venues(first), vec![live_venue()]);
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

/// A fetch that yields nothing is answered with the fallback table, never an error
#[tokio::test]
async fn test_empty_fetch_serves_fallback() {
    let (app, source) = app_with_source(Vec::new());

    let (status, origin, body) = get(&app, "/venues").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(origin.as_deref(), Some("fallback"));
    assert_eq!(as_venues(body), fallback_venues());

    // Nothing was cached, so the next request fetches again
    get(&app, "/venues").await;
    assert_eq!(source.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_venue_json_shape() {
    let app = fallback_app();
    let (_, _, body) = get(&app, "/venues").await;
    let first = &body[0];
    for field in ["id", "name", "max", "fee", "slippage", "chain", "protocol", "tvl", "supportedTokens"] {
        assert!(first.get(field).is_some(), "missing field {}", field);
    }
    assert_eq!(first["chain"], "ethereum");
}

#[tokio::test]
async fn test_venue_by_id() {
    let (app, _) = app_with_source(vec![live_venue()]);

    let (status, _, body) = get(&app, "/venues/uniswap-v3-3000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["max"], 42_000);

    // Not live, found in the fallback table
    let (status, _, body) = get(&app, "/venues/curve").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Curve");

    let (status, _, body) = get(&app, "/venues/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Venue not found");
}

#[tokio::test]
async fn test_venue_by_id_forced_fallback() {
    let (app, _) = app_with_source(vec![live_venue()]);

    let (status, _, body) = get(&app, "/venues/uniswap-v3-3000?force_fallback=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["max"], 900_000);

    let (status, _, body) = get(&app, "/venues/does-not-exist?force_fallback=true").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Venue not found in fallback data");
}

/// totalCost is exactly fee + slippage + gasCost
#[tokio::test]
async fn test_estimate_additive_total() {
    let app = fallback_app();
    let (status, body) = post(
        &app,
        "/estimate-swap",
        json!({"venue": "Uniswap V3", "amount": 10, "sourceToken": "ETH", "targetToken": "USDC"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let fee = body["fee"].as_f64().unwrap();
    let slippage = body["slippage"].as_f64().unwrap();
    let gas = body["gasCost"].as_f64().unwrap();
    assert_eq!(body["totalCost"].as_f64().unwrap(), fee + slippage + gas);
    assert_eq!(body["route"], json!(["Uniswap V3"]));
    assert!(body.get("warnings").is_none());
}

#[tokio::test]
async fn test_estimate_defaults_tokens() {
    let app = fallback_app();
    let (_, explicit) = post(
        &app,
        "/estimate-swap",
        json!({"venue": "Curve", "amount": 2, "sourceToken": "ETH", "targetToken": "USDC"}),
    )
    .await;
    let (_, defaulted) = post(&app, "/estimate-swap", json!({"venue": "Curve", "amount": 2})).await;
    assert_eq!(explicit, defaulted);
}

/// Unknown venues use Uniswap V3 costs and say so
#[tokio::test]
async fn test_estimate_unknown_venue() {
    let app = fallback_app();
    let (_, known) = post(&app, "/estimate-swap", json!({"venue": "Uniswap V3", "amount": 3})).await;
    let (status, unknown) = post(&app, "/estimate-swap", json!({"venue": "NoSuchDex", "amount": 3})).await;

    assert_eq!(status, StatusCode::OK);
    for field in ["fee", "slippage", "gasCost", "totalCost", "estimatedOutput"] {
        assert_eq!(known[field], unknown[field], "{} differs", field);
    }
    assert_eq!(unknown["route"], json!(["NoSuchDex"]));
    assert_eq!(unknown["warnings"], json!([{"kind": "unknownVenue", "value": "NoSuchDex"}]));
}

#[tokio::test]
async fn test_estimate_missing_amount() {
    let app = fallback_app();
    let (status, body) = post(&app, "/estimate-swap", json!({"venue": "Uniswap V3"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required parameters");
    assert_eq!(body["required"], json!(["venue", "amount"]));
}

#[tokio::test]
async fn test_estimate_missing_or_empty_venue() {
    let app = fallback_app();
    for body in [json!({"amount": 1}), json!({"venue": "", "amount": 1}), json!({"venue": "Curve", "amount": 0})] {
        let (status, response) = post(&app, "/estimate-swap", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["required"], json!(["venue", "amount"]));
    }
}

#[tokio::test]
async fn test_estimate_negative_amount() {
    let app = fallback_app();
    let (status, body) = post(&app, "/estimate-swap", json!({"venue": "Curve", "amount": -5})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("amount"));
    assert!(body.get("required").is_none());
}

/// Output that overflows f64 is rejected instead of serialized as null
#[tokio::test]
async fn test_estimate_overflowing_amount() {
    let app = fallback_app();
    let (status, body) = post(&app, "/estimate-swap", json!({"venue": "Uniswap V3", "amount": 1e308})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("too large"));
}

#[tokio::test]
async fn test_estimate_malformed_json() {
    let app = fallback_app();
    let (status, body) = post_raw(&app, "/estimate-swap", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_health_reports_cache_age() {
    let (app, _) = app_with_source(vec![live_venue()]);

    let (status, _, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "venue-service");
    assert_eq!(body["implementation"], "live");
    assert!(body["cacheAge"].is_null());
    assert!(body["timestamp"].is_string());
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));

    get(&app, "/venues").await;
    let (_, _, body) = get(&app, "/health").await;
    assert!(body["cacheAge"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_health_fallback_mode() {
    let (_, _, body) = get(&fallback_app(), "/health").await;
    assert_eq!(body["implementation"], "fallback");
}

#[tokio::test]
async fn test_cors_is_permissive() {
    let response = fallback_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
