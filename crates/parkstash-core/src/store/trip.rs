use crate::clock::Clock;
use crate::medium::Medium;
use crate::models::{Park, TripData};

use super::{keys, Store};

impl<M: Medium, C: Clock> Store<M, C> {
    pub fn save_trip_data(&self, trip: &TripData) -> bool {
        self.set(keys::TRIP_DATA, trip)
    }

    pub fn trip_data(&self) -> Option<TripData> {
        self.lookup(keys::TRIP_DATA).found()
    }

    pub fn clear_trip_data(&self) -> bool {
        self.remove(keys::TRIP_DATA)
    }

    /// Replace the stored recommendations wholesale.
    pub fn save_recommendations(&self, parks: &[Park]) -> bool {
        self.set(keys::RECOMMENDATIONS, parks)
    }

    pub fn recommendations(&self) -> Vec<Park> {
        self.get(keys::RECOMMENDATIONS, Vec::new())
    }
}
