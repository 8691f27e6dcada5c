//! Records persisted by the store.
//!
//! - `Park`: one entry of the parks dataset, also used for recommendations
//! - `Favorite`, `ViewedPark`: per-user park lists
//! - `UserPreferences`, `PreferenceKey`: directory view settings
//! - `TripData`: answers from the trip planner form

pub mod favorite;
pub mod park;
pub mod preferences;
pub mod trip;

pub use favorite::{Favorite, ViewedPark};
pub use park::{BestSeason, Park};
pub use preferences::{PreferenceKey, UserPreferences};
pub use trip::TripData;
