use chrono::Duration;
use serde::{de::IgnoredAny, Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::StoreError;
use crate::loader::ParksLoader;
use crate::medium::Medium;
use crate::models::Park;

use super::{keys, Lookup, Store};

/// Cached parks data expires after 24 hours, in milliseconds.
pub const CACHE_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// A payload stamped with its write time in epoch milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: i64,
}

impl<T> CacheEntry<T> {
    pub fn new(data: T, timestamp: i64) -> Self {
        Self { data, timestamp }
    }

    /// Elapsed milliseconds, saturated since the timestamp is stored text.
    fn elapsed_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.timestamp)
    }

    pub fn age(&self, now_ms: i64) -> Duration {
        // TimeDelta cannot hold i64::MIN milliseconds
        Duration::milliseconds(self.elapsed_ms(now_ms).max(-i64::MAX))
    }

    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.elapsed_ms(now_ms) > CACHE_TTL_MS
    }
}

/// Short human form of a cache age ("just now", "5m ago", "3h ago", "2d ago").
pub fn age_display(age: Duration) -> String {
    let minutes = age.num_minutes();
    if minutes < 1 {
        // Also covers clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        if minutes % 60 >= 30 {
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    } else {
        let days = minutes / 1440;
        if (minutes % 1440) / 60 >= 12 {
            format!("{}d ago", days + 1)
        } else {
            format!("{}d ago", days)
        }
    }
}

impl<M: Medium, C: Clock> Store<M, C> {
    /// Return the cached parks dataset, or load, cache and return it.
    ///
    /// A missing, expired or unreadable cache entry counts as a miss.
    /// Failing to write the fresh data back is logged and ignored. The
    /// loader's failure is the one error this store hands to callers.
    ///
    /// No lock is held while the loader runs: concurrent callers may each
    /// load and the last write wins.
    pub async fn fetch_with_cache<L>(&self, loader: &L) -> Result<Vec<Park>, StoreError>
    where
        L: ParksLoader + ?Sized,
    {
        if let Some(parks) = self.cached_parks() {
            info!(count = parks.len(), "Using cached parks data");
            return Ok(parks);
        }

        let parks = loader.load().await.map_err(|e| {
            warn!(error = %e, "Error fetching parks data");
            StoreError::from(e)
        })?;
        info!(count = parks.len(), "Loaded parks data");

        let entry = CacheEntry::new(&parks, self.now_ms());
        match self.try_set(keys::PARKS_CACHE, &entry) {
            Ok(()) => debug!("Parks data cached"),
            Err(e) => warn!(error = %e, "Unable to cache parks data"),
        }

        Ok(parks)
    }

    /// Unexpired cached dataset. Expired entries are deleted on read.
    pub fn cached_parks(&self) -> Option<Vec<Park>> {
        match self.lookup::<CacheEntry<Vec<Park>>>(keys::PARKS_CACHE) {
            Lookup::Found(entry) if entry.is_expired(self.now_ms()) => {
                info!("Cached parks data expired");
                self.remove(keys::PARKS_CACHE);
                None
            }
            Lookup::Found(entry) => Some(entry.data),
            Lookup::Absent => None,
            Lookup::Corrupt(e) => {
                debug!(error = %e, "Ignoring unreadable parks cache");
                None
            }
            Lookup::Unavailable(_) => None,
        }
    }

    pub fn clear_cache(&self) -> bool {
        self.remove(keys::PARKS_CACHE)
    }

    /// Age of the cached dataset, whether or not it has expired.
    pub fn cache_age(&self) -> Option<Duration> {
        self.lookup::<CacheEntry<IgnoredAny>>(keys::PARKS_CACHE)
            .found()
            .map(|entry| entry.age(self.now_ms()))
    }

    pub fn cache_age_display(&self) -> String {
        self.cache_age()
            .map(age_display)
            .unwrap_or_else(|| "never".to_string())
    }
}
