use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::park::id_from_string_or_number;
use super::Park;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Favorite {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub added_at: DateTime<Utc>,
}

impl Favorite {
    pub fn from_park(park: &Park, added_at: DateTime<Utc>) -> Self {
        Self {
            id: park.id.clone(),
            name: park.name.clone(),
            location: park.location.clone(),
            added_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ViewedPark {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    pub viewed_at: DateTime<Utc>,
}

impl ViewedPark {
    pub fn from_park(park: &Park, viewed_at: DateTime<Utc>) -> Self {
        Self {
            id: park.id.clone(),
            name: park.name.clone(),
            viewed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorite_reads_browser_timestamps() {
        let json =
            r#"{"id":"zion","name":"Zion","location":"Utah","addedAt":"2024-05-01T12:30:00.000Z"}"#;
        let fav: Favorite = serde_json::from_str(json).unwrap();
        assert_eq!(fav.added_at.to_rfc3339(), "2024-05-01T12:30:00+00:00");

        let out = serde_json::to_value(&fav).unwrap();
        assert!(out.get("addedAt").is_some());
        assert!(out.get("added_at").is_none());
    }

    #[test]
    fn test_numeric_ids_read_as_strings() {
        let fav: Favorite = serde_json::from_str(
            r#"{"id":7,"name":"Zion","location":"Utah","addedAt":"2024-05-01T12:30:00Z"}"#,
        )
        .unwrap();
        assert_eq!(fav.id, "7");

        let viewed: ViewedPark =
            serde_json::from_str(r#"{"id":12,"name":"Acadia","viewedAt":"2024-05-01T12:30:00Z"}"#)
                .unwrap();
        assert_eq!(viewed.id, "12");
    }
}
