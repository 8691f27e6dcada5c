use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Directory view settings.
///
/// Fields missing from a stored record take their default value, so an
/// older or partial record still reads as a complete one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct UserPreferences {
    pub sort_by: String,
    pub filter_activity: String,
    pub filter_season: String,
    pub view_mode: String,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            sort_by: "name".to_string(),
            filter_activity: String::new(),
            filter_season: String::new(),
            view_mode: "grid".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    SortBy,
    FilterActivity,
    FilterSeason,
    ViewMode,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 4] = [
        PreferenceKey::SortBy,
        PreferenceKey::FilterActivity,
        PreferenceKey::FilterSeason,
        PreferenceKey::ViewMode,
    ];

    /// Name as stored in the preferences record
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::SortBy => "sortBy",
            PreferenceKey::FilterActivity => "filterActivity",
            PreferenceKey::FilterSeason => "filterSeason",
            PreferenceKey::ViewMode => "viewMode",
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PreferenceKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PreferenceKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown preference: {}", s))
    }
}

impl UserPreferences {
    pub fn get(&self, key: PreferenceKey) -> &str {
        match key {
            PreferenceKey::SortBy => &self.sort_by,
            PreferenceKey::FilterActivity => &self.filter_activity,
            PreferenceKey::FilterSeason => &self.filter_season,
            PreferenceKey::ViewMode => &self.view_mode,
        }
    }

    pub fn set(&mut self, key: PreferenceKey, value: impl Into<String>) {
        let value = value.into();
        match key {
            PreferenceKey::SortBy => self.sort_by = value,
            PreferenceKey::FilterActivity => self.filter_activity = value,
            PreferenceKey::FilterSeason => self.filter_season = value,
            PreferenceKey::ViewMode => self.view_mode = value,
        }
    }
}
