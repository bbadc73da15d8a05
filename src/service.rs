//! Cache → live fetch → fallback control flow shared by the HTTP handlers.

use log::{debug, info, warn};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::cache::VenueCache;
use crate::fallback::{fallback_venues, find_fallback};
use crate::fetcher::VenueSource;
use crate::metrics;
use crate::types::Venue;

/// Where a venue list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueOrigin {
    Live,
    Cache,
    Fallback,
}

impl VenueOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            VenueOrigin::Live => "live",
            VenueOrigin::Cache => "cache",
            VenueOrigin::Fallback => "fallback",
        }
    }
}

/// Whether the service has a live source at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceMode {
    Live,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct VenueSnapshot {
    pub venues: Arc<Vec<Venue>>,
    pub origin: VenueOrigin,
}

pub struct VenueService {
    cache: VenueCache,
    source: Option<Arc<dyn VenueSource>>,
    refresh_lock: Mutex<()>,
    /// Completed refresh attempts, successful or not. Only bumped under `refresh_lock`.
    attempts: AtomicU64,
}

impl VenueService {
    pub fn new(source: Arc<dyn VenueSource>, ttl: Duration) -> Self {
        Self {
            cache: VenueCache::new(ttl),
            source: Some(source),
            refresh_lock: Mutex::new(()),
            attempts: AtomicU64::new(0),
        }
    }

    /// Service without a live source: every request is answered from the fallback table.
    pub fn fallback_only() -> Self {
        Self {
            cache: VenueCache::default(),
            source: None,
            refresh_lock: Mutex::new(()),
            attempts: AtomicU64::new(0),
        }
    }

    pub fn mode(&self) -> ServiceMode {
        if self.source.is_some() {
            ServiceMode::Live
        } else {
            ServiceMode::Fallback
        }
    }

    pub fn cache(&self) -> &VenueCache {
        &self.cache
    }

    pub fn cache_age(&self) -> Option<Duration> {
        self.cache.age()
    }

    pub fn fallback_venues(&self) -> VenueSnapshot {
        metrics::increment_fallback_served("forced");
        fallback_snapshot()
    }

    /// Current venues: fresh cache, else a live fetch, else the fallback table.
    ///
    /// Refreshes are single-flight: concurrent callers that miss the cache queue on one
    /// lock and share the outcome of the refresh that finished while they waited, empty or not.
    pub async fn venues(&self) -> VenueSnapshot {
        if let Some(venues) = self.cache.get_fresh() {
            debug!("Returning cached venue data");
            return VenueSnapshot { venues, origin: VenueOrigin::Cache };
        }

        let Some(source) = self.source.as_ref() else {
            metrics::increment_fallback_served("no_source");
            return fallback_snapshot();
        };

        let seen = self.attempts.load(Ordering::Acquire);
        let _guard = self.refresh_lock.lock().await;
        if self.attempts.load(Ordering::Acquire) != seen {
            return match self.cache.peek_fresh() {
                Some(venues) => {
                    debug!("Cache refreshed by a concurrent request");
                    VenueSnapshot { venues, origin: VenueOrigin::Cache }
                }
                None => {
                    debug!("Concurrent refresh found no live venues, using fallback venue data");
                    metrics::increment_fallback_served("empty_fetch");
                    fallback_snapshot()
                }
            };
        }
        if let Some(venues) = self.cache.peek_fresh() {
            return VenueSnapshot { venues, origin: VenueOrigin::Cache };
        }

        info!("Fetching fresh venue data");
        let fetched = source.fetch().await;
        let stored = self.cache.set(validated(fetched));
        self.attempts.fetch_add(1, Ordering::Release);
        match stored {
            Some(venues) => VenueSnapshot { venues, origin: VenueOrigin::Live },
            None => {
                info!("No live venues available, using fallback venue data");
                metrics::increment_fallback_served("empty_fetch");
                fallback_snapshot()
            }
        }
    }

    /// Looks a venue up in the cache (at any age), then in a current venue list, then in
    /// the fallback table.
    pub async fn venue_by_id(&self, id: &str) -> Option<Venue> {
        if let Some(venue) = self.cache.find(id) {
            return Some(venue);
        }
        let snapshot = self.venues().await;
        if let Some(venue) = snapshot.venues.iter().find(|v| v.id == id) {
            return Some(venue.clone());
        }
        find_fallback(id).cloned()
    }

    pub fn fallback_venue_by_id(&self, id: &str) -> Option<Venue> {
        find_fallback(id).cloned()
    }
}

fn fallback_snapshot() -> VenueSnapshot {
    VenueSnapshot {
        venues: Arc::new(fallback_venues().to_vec()),
        origin: VenueOrigin::Fallback,
    }
}

fn validated(venues: Vec<Venue>) -> Vec<Venue> {
    venues
        .into_iter()
        .filter(|v| match v.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("Dropping live venue: {}", e);
                false
            }
        })
        .collect()
}
