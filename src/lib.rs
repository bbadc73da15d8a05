//! # Venue Service
//!
//! Discovers DEX trading venues from on-chain state, caches them, and serves them over HTTP
//! together with a closed-form swap-cost estimator.
//!
//! ## Overview
//!
//! - **Fetching**: protocol adapters read pool state (Uniswap V3 fee tiers, SushiSwap pairs)
//!   through an `ethers` provider and aggregate it into one venue per tier or protocol
//! - **Caching**: the last non-empty venue list is kept for a TTL and refreshed single-flight
//! - **Fallback**: a static venue table answers whenever live data is unavailable
//! - **Estimation**: linear fee, slippage and gas costs from per-venue constants
//!
//! ## Architecture
//!
//! ### Fetch Layer
//! [`fetcher::VenueFetcher`] probes the provider, fans out to every [`DexAdapter`] concurrently
//! and keeps whatever succeeded. Any failure degrades to fewer venues, never to an error.
//!
//! ### Service Layer
//! [`service::VenueService`] combines [`cache::VenueCache`], the fetcher and the fallback table
//! and reports where each answer came from.
//!
//! ### HTTP Layer
//! [`webserver`] exposes `/venues`, `/venues/:id`, `/estimate-swap` and `/health`.

// Core Types
/// Venue, token and conversion types
pub mod types;
/// Raw pool readings and venue sizing
pub mod pools;
/// Trait for DEX-specific adapters
pub mod dex_adapter;

// DEX Adapters
/// Protocol-specific adapters (Uniswap V3, SushiSwap)
pub mod adapters;
/// Smart contract ABIs (read-only)
pub mod contracts;

// Venue Data
/// Concurrent venue fetching across adapters
pub mod fetcher;
/// TTL cache for the last fetched venue list
pub mod cache;
/// Static venue table used when live data is unavailable
pub mod fallback;
/// Cache, fetch and fallback orchestration
pub mod service;
/// Swap-cost estimation
pub mod estimator;

// Infrastructure
/// Metrics and observability
pub mod metrics;
/// Configuration management
pub mod settings;
/// HTTP API
pub mod webserver;

// Re-exports for convenience
pub use cache::VenueCache;
pub use dex_adapter::DexAdapter;
pub use estimator::{Estimate, EstimateWarning, SwapEstimator};
pub use fetcher::{VenueFetcher, VenueSource};
pub use service::{ServiceMode, VenueOrigin, VenueService, VenueSnapshot};
pub use settings::Settings;
pub use types::{Chain, Protocol, SwapQuote, Venue};
