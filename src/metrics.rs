// src/metrics.rs
//
// Recording helpers for the venue service. With the `observability` feature disabled every
// function compiles to a no-op so call sites never need cfg guards.

use std::time::Duration;

#[cfg(feature = "observability")]
use metrics::{describe_counter, describe_gauge, describe_histogram, gauge, histogram, increment_counter, Unit};

/// Registers metric descriptions. Call once at startup, after the recorder is installed.
#[cfg(feature = "observability")]
pub fn describe_metrics() {
    describe_counter!("venue_cache_hits_total", "Venue requests served from a fresh cache");
    describe_counter!("venue_cache_misses_total", "Venue requests that found the cache empty or stale");
    describe_counter!("venue_fallback_served_total", "Responses built from the fallback table");
    describe_counter!("venue_fetch_failures_total", "Failed probes, adapters or timed-out fetches");
    describe_gauge!("venue_cached_count", "Venues held in the cache");
    describe_histogram!("venue_fetch_latency_seconds", Unit::Seconds, "Per-protocol venue fetch latency");
    describe_counter!("swap_estimates_total", "Swap estimates served");
}

#[cfg(not(feature = "observability"))]
pub fn describe_metrics() {}

/// Installs the Prometheus exporter listening on `addr`.
#[cfg(feature = "observability")]
pub fn install_prometheus(addr: std::net::SocketAddr) -> anyhow::Result<()> {
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    describe_metrics();
    log::info!("Prometheus exporter listening on {}", addr);
    Ok(())
}

#[cfg(feature = "observability")]
pub fn increment_cache_hit() {
    increment_counter!("venue_cache_hits_total");
}
#[cfg(not(feature = "observability"))]
pub fn increment_cache_hit() {}

#[cfg(feature = "observability")]
pub fn increment_cache_miss() {
    increment_counter!("venue_cache_misses_total");
}
#[cfg(not(feature = "observability"))]
pub fn increment_cache_miss() {}

#[cfg(feature = "observability")]
pub fn increment_fallback_served(reason: &'static str) {
    increment_counter!("venue_fallback_served_total", "reason" => reason);
}
#[cfg(not(feature = "observability"))]
pub fn increment_fallback_served(_reason: &'static str) {}

#[cfg(feature = "observability")]
pub fn increment_fetch_failure(component: &'static str) {
    increment_counter!("venue_fetch_failures_total", "component" => component);
}
#[cfg(not(feature = "observability"))]
pub fn increment_fetch_failure(_component: &'static str) {}

#[cfg(feature = "observability")]
pub fn record_fetch_latency(protocol: &'static str, duration: Duration) {
    histogram!("venue_fetch_latency_seconds", duration.as_secs_f64(), "protocol" => protocol);
}
#[cfg(not(feature = "observability"))]
pub fn record_fetch_latency(_protocol: &'static str, _duration: Duration) {}

#[cfg(feature = "observability")]
pub fn set_cached_venues(count: usize) {
    gauge!("venue_cached_count", count as f64);
}
#[cfg(not(feature = "observability"))]
pub fn set_cached_venues(_count: usize) {}

#[cfg(feature = "observability")]
pub fn increment_swap_estimate(defaulted: bool) {
    let outcome = if defaulted { "defaulted" } else { "exact" };
    increment_counter!("swap_estimates_total", "outcome" => outcome);
}
#[cfg(not(feature = "observability"))]
pub fn increment_swap_estimate(_defaulted: bool) {}
