//! Park recommendations for a trip planner submission.

use std::cmp::Ordering;

use crate::models::{Park, TripData};

/// Number of parks recommended per trip
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Parks below this elevation (feet) count as low
const LOW_ELEVATION_FT: i64 = 6000;

/// Parks at or above this elevation (feet) count as high
const HIGH_ELEVATION_FT: i64 = 8000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationBand {
    Any,
    Low,
    Moderate,
    High,
}

impl ElevationBand {
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("low") => ElevationBand::Low,
            Some("moderate") => ElevationBand::Moderate,
            Some("high") => ElevationBand::High,
            _ => ElevationBand::Any,
        }
    }

    /// Parks without an elevation are treated as sea level.
    pub fn contains(&self, park: &Park) -> bool {
        let elevation = park.elevation.unwrap_or(0);
        match self {
            ElevationBand::Any => true,
            ElevationBand::Low => elevation < LOW_ELEVATION_FT,
            ElevationBand::Moderate => {
                (LOW_ELEVATION_FT..HIGH_ELEVATION_FT).contains(&elevation)
            }
            ElevationBand::High => elevation >= HIGH_ELEVATION_FT,
        }
    }
}

/// Best-rated parks matching the trip's season, activities and elevation.
///
/// An unset season or an empty activity list does not filter.
pub fn recommend(parks: &[Park], trip: &TripData) -> Vec<Park> {
    let band = ElevationBand::parse(trip.elevation.as_deref());
    let season = trip.season.as_deref().filter(|s| !s.is_empty());

    let mut matches: Vec<Park> = parks
        .iter()
        .filter(|park| season.map_or(true, |s| park.best_season.includes(s)))
        .filter(|park| {
            trip.activities.is_empty() || trip.activities.iter().any(|a| park.has_activity(a))
        })
        .filter(|park| band.contains(park))
        .cloned()
        .collect();

    // Stable, so equally rated parks keep dataset order
    matches.sort_by(|a, b| {
        let (a, b) = (a.rating.unwrap_or(0.0), b.rating.unwrap_or(0.0));
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });
    matches.truncate(MAX_RECOMMENDATIONS);
    matches
}
