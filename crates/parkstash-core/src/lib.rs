//! parkstash core library.
//!
//! Persistent favorites, preferences, trip planner answers, viewing history
//! and a 24-hour parks dataset cache, all stored as JSON text in a
//! synchronous key-value [`Medium`].
//!
//! ```no_run
//! use parkstash_core::{MemoryMedium, Park, Store};
//!
//! let store = Store::new(MemoryMedium::new());
//! store.add_favorite(&Park::new("zion", "Zion"));
//! assert!(store.is_favorite("zion"));
//! ```

pub mod clock;
pub mod error;
pub mod loader;
pub mod medium;
pub mod models;
pub mod planner;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{LoaderError, MediumError, StoreError};
pub use loader::{FileLoader, HttpLoader, ParksLoader};
pub use medium::{FileMedium, Medium, MemoryMedium};
pub use models::{BestSeason, Favorite, Park, PreferenceKey, TripData, UserPreferences, ViewedPark};
pub use store::{keys, CacheEntry, Lookup, Store, CACHE_TTL_MS, MAX_VIEWED_PARKS};
