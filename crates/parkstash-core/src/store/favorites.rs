use tracing::debug;

use crate::clock::Clock;
use crate::medium::Medium;
use crate::models::{Favorite, Park};

use super::{keys, Store};

impl<M: Medium, C: Clock> Store<M, C> {
    pub fn favorites(&self) -> Vec<Favorite> {
        let favorites: Vec<Favorite> = self.get(keys::FAVORITES, Vec::new());
        debug!(count = favorites.len(), "Loaded favorites");
        favorites
    }

    pub fn save_favorites(&self, favorites: &[Favorite]) -> bool {
        self.set(keys::FAVORITES, favorites)
    }

    /// Append `park` to the favorites unless its id is already there.
    /// Returns `true` only if a new favorite was written.
    /// A stored list that cannot be read is left untouched.
    pub fn add_favorite(&self, park: &Park) -> bool {
        let Some(mut favorites) = self.load_for_update::<Vec<Favorite>>(keys::FAVORITES) else {
            return false;
        };
        if favorites.iter().any(|fav| fav.id == park.id) {
            return false;
        }

        favorites.push(Favorite::from_park(park, self.clock().now()));
        let saved = self.save_favorites(&favorites);
        if saved {
            debug!(park_id = %park.id, "Added park to favorites");
        }
        saved
    }

    /// Returns `true` iff a favorite with `park_id` was removed.
    pub fn remove_favorite(&self, park_id: &str) -> bool {
        let Some(favorites) = self.load_for_update::<Vec<Favorite>>(keys::FAVORITES) else {
            return false;
        };
        let before = favorites.len();
        let remaining: Vec<Favorite> = favorites
            .into_iter()
            .filter(|fav| fav.id != park_id)
            .collect();

        if remaining.len() == before {
            return false;
        }

        let saved = self.save_favorites(&remaining);
        if saved {
            debug!(park_id = %park_id, "Removed park from favorites");
        }
        saved
    }

    /// Flip membership of `park`, returning whether it is now a favorite.
    pub fn toggle_favorite(&self, park: &Park) -> bool {
        if self.is_favorite(&park.id) {
            !self.remove_favorite(&park.id)
        } else {
            self.add_favorite(park)
        }
    }

    pub fn is_favorite(&self, park_id: &str) -> bool {
        self.favorites().iter().any(|fav| fav.id == park_id)
    }

    pub fn favorites_count(&self) -> usize {
        self.favorites().len()
    }

    /// Parks from `all_parks` that are favorites, in dataset order.
    pub fn favorite_parks(&self, all_parks: &[Park]) -> Vec<Park> {
        let favorites = self.favorites();
        all_parks
            .iter()
            .filter(|park| favorites.iter().any(|fav| fav.id == park.id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::store::test_support::store;

    fn zion() -> Park {
        Park::new("zion", "Zion").with_location("Utah")
    }

    fn acadia() -> Park {
        Park::new("acad", "Acadia").with_location("Maine")
    }

    #[test]
    fn test_add_then_is_favorite() {
        let store = store();
        assert!(!store.is_favorite("zion"));
        assert!(store.add_favorite(&zion()));
        assert!(store.is_favorite("zion"));

        let favs = store.favorites();
        assert_eq!(favs.len(), 1);
        assert_eq!(favs[0].name, "Zion");
        assert_eq!(favs[0].location, "Utah");
        assert_eq!(favs[0].added_at, store.clock().now());
    }

    #[test]
    fn test_add_twice_keeps_one_record() {
        let store = store();
        assert!(store.add_favorite(&zion()));
        let first_added = store.favorites()[0].added_at;

        store.clock().advance(Duration::minutes(5));
        assert!(!store.add_favorite(&zion()));
        assert_eq!(store.favorites_count(), 1);
        // Timestamp is set once, at insertion
        assert_eq!(store.favorites()[0].added_at, first_added);
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        let store = store();
        assert!(store.toggle_favorite(&zion()));
        assert!(store.is_favorite("zion"));
        assert!(!store.toggle_favorite(&zion()));
        assert!(!store.is_favorite("zion"));

        store.add_favorite(&acadia());
        assert!(!store.toggle_favorite(&acadia()));
        assert!(store.toggle_favorite(&acadia()));
        assert!(store.is_favorite("acad"));
    }

    #[test]
    fn test_remove_absent_id_leaves_list_unchanged() {
        let store = store();
        store.add_favorite(&zion());
        let before = store.medium().raw_get(keys::FAVORITES);

        assert!(!store.remove_favorite("yose"));
        assert_eq!(store.medium().raw_get(keys::FAVORITES), before);
        assert!(store.remove_favorite("zion"));
        assert_eq!(store.favorites_count(), 0);
    }

    #[test]
    fn test_favorite_parks_follow_dataset_order() {
        let store = store();
        store.add_favorite(&zion());
        store.add_favorite(&acadia());

        let all = vec![acadia(), Park::new("yose", "Yosemite"), zion()];
        let ids: Vec<String> = store.favorite_parks(&all).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["acad", "zion"]);
    }

    #[test]
    fn test_clear_all_resets_favorites_and_preferences() {
        use crate::models::{PreferenceKey, UserPreferences};

        let store = store();
        store.add_favorite(&zion());
        store.update_preference(PreferenceKey::SortBy, "rating");

        assert!(store.clear_all());
        assert!(!store.is_favorite("zion"));
        assert_eq!(store.preferences(), UserPreferences::default());
    }

    #[test]
    fn test_numeric_ids_from_browser_survive_add() {
        let store = store();
        store.medium().raw_set(
            keys::FAVORITES,
            r#"[{"id":7,"name":"Zion","location":"Utah","addedAt":"2024-05-01T12:30:00.000Z"}]"#,
        );

        assert!(store.is_favorite("7"));
        assert!(store.add_favorite(&acadia()));
        let ids: Vec<String> = store.favorites().into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["7", "acad"]);
    }

    #[test]
    fn test_unreadable_list_is_not_overwritten() {
        let store = store();
        let planted = r#"[{"id":"zion","name":"Zion","addedAt":"yesterday"}]"#;
        store.medium().raw_set(keys::FAVORITES, planted);

        assert!(!store.add_favorite(&acadia()));
        assert!(!store.toggle_favorite(&acadia()));
        assert!(!store.remove_favorite("zion"));
        assert_eq!(store.medium().raw_get(keys::FAVORITES).as_deref(), Some(planted));

        assert!(store.clear_all());
        assert!(store.add_favorite(&acadia()));
    }

    #[test]
    fn test_unavailable_storage_has_no_favorites() {
        let store = store();
        store.add_favorite(&zion());
        store.medium().set_available(false);

        assert!(!store.is_favorite("zion"));
        assert!(!store.add_favorite(&acadia()));
        assert!(!store.toggle_favorite(&acadia()));
        assert_eq!(store.favorites_count(), 0);
    }
}
