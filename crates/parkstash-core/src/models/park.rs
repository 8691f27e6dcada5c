use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A national park as it appears in the parks dataset.
///
/// Only `id` and `name` are required. Fields the dataset carries that are
/// not modelled here are kept in `extra` so they survive being cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Park {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub established: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<i64>,
    #[serde(default)]
    pub best_season: BestSeason,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub official_url: Option<String>,
    #[serde(flatten)]
    #[cfg_attr(feature = "ts", ts(skip))]
    pub extra: Map<String, Value>,
}

/// Seasons a park is best visited in.
/// Datasets write this either as one string ("Summer, Fall") or a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub enum BestSeason {
    Text(String),
    List(Vec<String>),
}

impl Default for BestSeason {
    fn default() -> Self {
        BestSeason::List(Vec::new())
    }
}

impl BestSeason {
    /// Substring match for text, element match for lists
    pub fn includes(&self, season: &str) -> bool {
        match self {
            BestSeason::Text(text) => text.contains(season),
            BestSeason::List(list) => list.iter().any(|s| s == season),
        }
    }
}

impl Park {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: String::new(),
            description: String::new(),
            established: None,
            area: None,
            elevation: None,
            best_season: BestSeason::default(),
            activities: Vec::new(),
            rating: None,
            image_url: None,
            official_url: None,
            extra: Map::new(),
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn has_activity(&self, activity: &str) -> bool {
        self.activities.iter().any(|a| a == activity)
    }
}

pub(crate) fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "park id must be a string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_park_from_dataset_json() {
        let json = r#"{
            "id": 7,
            "name": "Zion",
            "location": "Utah",
            "elevation": 3666,
            "bestSeason": "Spring, Fall",
            "activities": ["Hiking", "Canyoneering"],
            "rating": 4.8,
            "imageUrl": "images/zion.webp",
            "visitors": 4600000
        }"#;
        let park: Park = serde_json::from_str(json).unwrap();
        assert_eq!(park.id, "7");
        assert!(park.best_season.includes("Fall"));
        assert!(!park.best_season.includes("Winter"));
        assert!(park.has_activity("Hiking"));
        assert_eq!(park.extra.get("visitors"), Some(&Value::from(4600000)));

        // Unmodelled fields are written back out
        let back = serde_json::to_value(&park).unwrap();
        assert_eq!(back["visitors"], 4600000);
        assert_eq!(back["imageUrl"], "images/zion.webp");
    }

    #[test]
    fn test_best_season_list() {
        let park: Park =
            serde_json::from_str(r#"{"id":"yell","name":"Yellowstone","bestSeason":["Summer"]}"#)
                .unwrap();
        assert!(park.best_season.includes("Summer"));
        assert!(!park.best_season.includes("Sum"));
    }

    #[test]
    fn test_park_id_rejects_objects() {
        let result = serde_json::from_str::<Park>(r#"{"id":{},"name":"x"}"#);
        assert!(result.is_err());
    }
}
