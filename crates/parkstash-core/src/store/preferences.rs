use crate::clock::Clock;
use crate::medium::Medium;
use crate::models::{PreferenceKey, UserPreferences};

use super::{keys, Store};

impl<M: Medium, C: Clock> Store<M, C> {
    /// Stored preferences merged over the defaults.
    pub fn preferences(&self) -> UserPreferences {
        self.get(keys::USER_PREFERENCES, UserPreferences::default())
    }

    pub fn save_preferences(&self, prefs: &UserPreferences) -> bool {
        self.set(keys::USER_PREFERENCES, prefs)
    }

    /// Read-modify-write of a single field. Not atomic across writers.
    pub fn update_preference(&self, key: PreferenceKey, value: impl Into<String>) -> bool {
        let mut prefs = self.preferences();
        prefs.set(key, value);
        self.save_preferences(&prefs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::store;

    #[test]
    fn test_empty_store_returns_defaults() {
        let store = store();
        let prefs = store.preferences();
        assert_eq!(prefs.sort_by, "name");
        assert_eq!(prefs.filter_activity, "");
        assert_eq!(prefs.filter_season, "");
        assert_eq!(prefs.view_mode, "grid");
    }

    #[test]
    fn test_update_changes_only_one_field() {
        let store = store();
        assert!(store.update_preference(PreferenceKey::FilterSeason, "Winter"));
        let before = store.preferences();

        assert!(store.update_preference(PreferenceKey::ViewMode, "list"));
        let after = store.preferences();
        assert_eq!(after.view_mode, "list");
        assert_eq!(after.sort_by, before.sort_by);
        assert_eq!(after.filter_activity, before.filter_activity);
        assert_eq!(after.filter_season, "Winter");
    }

    #[test]
    fn test_stored_partial_record_merges_over_defaults() {
        let store = store();
        store
            .medium()
            .raw_set(keys::USER_PREFERENCES, r#"{"sortBy":"rating"}"#);
        let prefs = store.preferences();
        assert_eq!(prefs.sort_by, "rating");
        assert_eq!(prefs.view_mode, "grid");
    }

    #[test]
    fn test_corrupt_preferences_read_as_defaults() {
        let store = store();
        store.medium().raw_set(keys::USER_PREFERENCES, "grid");
        assert_eq!(store.preferences(), UserPreferences::default());
    }
}
