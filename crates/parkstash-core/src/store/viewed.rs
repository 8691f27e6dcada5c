use tracing::debug;

use crate::clock::Clock;
use crate::medium::Medium;
use crate::models::{Park, ViewedPark};

use super::{keys, Store};

/// Number of recently viewed parks kept, most recent first
pub const MAX_VIEWED_PARKS: usize = 10;

impl<M: Medium, C: Clock> Store<M, C> {
    /// Record a view of `park`, moving it to the front of the history.
    /// An unreadable stored history is left untouched.
    pub fn add_viewed_park(&self, park: &Park) -> bool {
        let Some(mut viewed) = self.load_for_update::<Vec<ViewedPark>>(keys::VIEWED_PARKS) else {
            return false;
        };
        viewed.retain(|p| p.id != park.id);
        viewed.insert(0, ViewedPark::from_park(park, self.clock().now()));
        viewed.truncate(MAX_VIEWED_PARKS);

        let saved = self.set(keys::VIEWED_PARKS, &viewed);
        if saved {
            debug!(park_id = %park.id, "Park view tracked");
        }
        saved
    }

    pub fn recently_viewed(&self) -> Vec<ViewedPark> {
        self.get(keys::VIEWED_PARKS, Vec::new())
    }
}
