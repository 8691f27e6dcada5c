//! JSON facade over a [`Medium`].
//!
//! The `Store` owns every record the app persists. Reads fall back to a
//! default and writes report `false` instead of failing, so callers never
//! have to handle storage errors on the favorites, preferences or history
//! paths. Only the parks cache propagates an error, because an empty
//! dataset is not a safe fallback.
//!
//! Sub-protocols live in their own files:
//! - `favorites`: add, remove, toggle, membership
//! - `preferences`: defaults and single-field updates
//! - `trip`: planner answers and recommendations
//! - `viewed`: most-recently-viewed parks, capped
//! - `cache`: time-limited parks dataset cache

pub mod cache;
pub mod favorites;
pub mod preferences;
pub mod trip;
pub mod viewed;

pub use cache::{CacheEntry, CACHE_TTL_MS};
pub use viewed::MAX_VIEWED_PARKS;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{MediumError, StoreError};
use crate::medium::Medium;

/// Namespaced keys owned by the store.
pub mod keys {
    pub const FAVORITES: &str = "npe_favorites";
    pub const USER_PREFERENCES: &str = "npe_user_prefs";
    pub const TRIP_DATA: &str = "tripPlannerData";
    pub const RECOMMENDATIONS: &str = "tripRecommendations";
    pub const VIEWED_PARKS: &str = "npe_viewed_parks";
    pub const PARKS_CACHE: &str = "parksDataCache";

    /// Every key `clear_all` removes
    pub const ALL: [&str; 6] = [
        FAVORITES,
        USER_PREFERENCES,
        TRIP_DATA,
        RECOMMENDATIONS,
        VIEWED_PARKS,
        PARKS_CACHE,
    ];
}

/// Sentinel key written and removed to check the medium
const SENTINEL_KEY: &str = "__storage_test__";

/// Outcome of reading one key.
#[derive(Debug)]
pub enum Lookup<T> {
    Found(T),
    Absent,
    /// Stored text did not parse as the requested type
    Corrupt(serde_json::Error),
    Unavailable(MediumError),
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Lookup::Absent)
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Lookup::Corrupt(_))
    }

    /// Absent becomes `Ok(None)`; corrupt and unavailable become errors.
    pub fn into_result(self, key: &str) -> Result<Option<T>, StoreError> {
        match self {
            Lookup::Found(value) => Ok(Some(value)),
            Lookup::Absent => Ok(None),
            Lookup::Corrupt(source) => Err(StoreError::Corrupt {
                key: key.to_string(),
                source,
            }),
            Lookup::Unavailable(e) => Err(e.into()),
        }
    }
}

pub struct Store<M, C = SystemClock> {
    medium: M,
    clock: C,
}

impl<M: Medium> Store<M> {
    pub fn new(medium: M) -> Self {
        Self::with_clock(medium, SystemClock)
    }
}

impl<M: Medium, C: Clock> Store<M, C> {
    pub fn with_clock(medium: M, clock: C) -> Self {
        Self { medium, clock }
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn check_writable(&self) -> Result<(), MediumError> {
        self.medium.set_item(SENTINEL_KEY, SENTINEL_KEY)?;
        self.medium.remove_item(SENTINEL_KEY)
    }

    /// Write and remove a sentinel key; `false` on any failure.
    pub fn is_available(&self) -> bool {
        match self.check_writable() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Storage is not available");
                false
            }
        }
    }

    /// Read and parse `key`, reporting why nothing usable came back.
    pub fn lookup<T: DeserializeOwned>(&self, key: &str) -> Lookup<T> {
        if let Err(e) = self.check_writable() {
            warn!(key = %key, error = %e, "Storage is not available");
            return Lookup::Unavailable(e);
        }

        let raw = match self.medium.get_item(key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return Lookup::Absent,
            Err(e) => {
                warn!(key = %key, error = %e, "Error reading from storage");
                return Lookup::Unavailable(e);
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                debug!(key = %key, "Retrieved from storage");
                Lookup::Found(value)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Stored value is not valid JSON");
                Lookup::Corrupt(e)
            }
        }
    }

    /// Parsed value of `key`, or `default` if it is missing, corrupt or
    /// storage is unavailable.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.lookup(key).found().unwrap_or(default)
    }

    pub fn try_set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        self.check_writable()?;
        let serialized = serde_json::to_string(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.medium.set_item(key, &serialized)?;
        debug!(key = %key, bytes = serialized.len(), "Saved to storage");
        Ok(())
    }

    /// Serialize and write `value`; `false` if it could not be stored.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match self.try_set(key, value) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %key, error = %e, "Cannot save to storage");
                false
            }
        }
    }

    /// Delete `key`. Only fails when storage is unavailable.
    pub fn remove(&self, key: &str) -> bool {
        let result = self.check_writable().and_then(|()| self.medium.remove_item(key));
        match result {
            Ok(()) => {
                debug!(key = %key, "Removed from storage");
                true
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Error removing from storage");
                false
            }
        }
    }

    /// Remove every key in [`keys::ALL`], leaving other keys alone.
    pub fn clear_all(&self) -> bool {
        let result = self
            .check_writable()
            .and_then(|()| keys::ALL.iter().try_for_each(|key| self.medium.remove_item(key)));
        match result {
            Ok(()) => {
                debug!("All app storage cleared");
                true
            }
            Err(e) => {
                warn!(error = %e, "Error clearing storage");
                false
            }
        }
    }

    /// Current value of `key` for a read-modify-write, default when absent.
    /// `None` when the stored text is unreadable or storage is unavailable,
    /// so the caller does not write over data it could not parse.
    fn load_for_update<T: DeserializeOwned + Default>(&self, key: &str) -> Option<T> {
        match self.lookup(key) {
            Lookup::Found(value) => Some(value),
            Lookup::Absent => Some(T::default()),
            Lookup::Corrupt(_) => {
                warn!(key = %key, "Refusing to overwrite unreadable entry");
                None
            }
            Lookup::Unavailable(_) => None,
        }
    }

    fn now_ms(&self) -> i64 {
        self.clock.now().timestamp_millis()
    }
}
