use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::listing::DateRange;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TripPace {
    Fast,
    Relaxed,
    /// Any pace the scorer has no opinion about.
    #[serde(other)]
    Other,
}

/// What a traveler asked the trip planner for.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TripIntent {
    pub destination_city: String,
    #[serde(default)]
    pub destination_country: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub budget_per_day: Option<f64>,
    #[serde(default)]
    pub pace: Option<TripPace>,
    #[serde(default)]
    pub group_size: Option<u32>,
    #[serde(default)]
    pub traveler_location: Option<GeoPoint>,
}

impl TripIntent {
    pub fn date_range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Interest tokens trimmed, lowercased and deduplicated, blanks dropped.
    pub fn normalized_interests(&self) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();
        for raw in &self.interests {
            let token = raw.trim().to_lowercase();
            if !token.is_empty() && !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        tokens
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.destination_city.trim().is_empty() {
            return Err("destination_city must not be empty".to_string());
        }
        if self.end_date < self.start_date {
            return Err("end_date must not be before start_date".to_string());
        }
        Ok(())
    }
}
