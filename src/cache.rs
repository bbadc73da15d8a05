use arc_swap::ArcSwapOption;
use log::debug;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::metrics;
use crate::types::Venue;

/// Default freshness window for live venue data.
pub const DEFAULT_VENUE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug)]
struct CachedVenues {
    venues: Arc<Vec<Venue>>,
    written_at: Instant,
}

/// Last successfully fetched venue list and the time it was written.
///
/// Reads are lock-free. A write swaps the whole snapshot, so readers see either the
/// previous list or the new one, never a mix.
#[derive(Debug)]
pub struct VenueCache {
    entry: ArcSwapOption<CachedVenues>,
    ttl: Duration,
}

impl VenueCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entry: ArcSwapOption::empty(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached venues regardless of age.
    pub fn get(&self) -> Option<Arc<Vec<Venue>>> {
        self.entry.load_full().map(|e| Arc::clone(&e.venues))
    }

    /// Cached venues only while fresh. Counts as a cache hit or miss.
    pub fn get_fresh(&self) -> Option<Arc<Vec<Venue>>> {
        let venues = self.peek_fresh();
        if venues.is_some() {
            metrics::increment_cache_hit();
        } else {
            metrics::increment_cache_miss();
        }
        venues
    }

    /// Same as [`get_fresh`](Self::get_fresh) without touching hit/miss counters.
    pub fn peek_fresh(&self) -> Option<Arc<Vec<Venue>>> {
        self.entry
            .load_full()
            .filter(|e| e.written_at.elapsed() < self.ttl)
            .map(|e| Arc::clone(&e.venues))
    }

    /// Replaces the snapshot. Empty lists are ignored so a failed refresh never masks
    /// the fallback table.
    pub fn set(&self, venues: Vec<Venue>) -> Option<Arc<Vec<Venue>>> {
        if venues.is_empty() {
            debug!("Refusing to cache an empty venue list");
            return None;
        }
        let venues = Arc::new(venues);
        metrics::set_cached_venues(venues.len());
        self.entry.store(Some(Arc::new(CachedVenues {
            venues: Arc::clone(&venues),
            written_at: Instant::now(),
        })));
        Some(venues)
    }

    pub fn is_fresh(&self) -> bool {
        self.age().map_or(false, |age| age < self.ttl)
    }

    /// Time since the last write, `None` when nothing was ever cached.
    pub fn age(&self) -> Option<Duration> {
        self.entry.load_full().map(|e| e.written_at.elapsed())
    }

    pub fn find(&self, id: &str) -> Option<Venue> {
        self.get()?.iter().find(|v| v.id == id).cloned()
    }
}

impl Default for VenueCache {
    fn default() -> Self {
        Self::new(DEFAULT_VENUE_TTL)
    }
}
