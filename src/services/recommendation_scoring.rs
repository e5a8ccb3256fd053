use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::{
    listing::CandidateListing,
    recommendation::ScoreBreakdown,
    trip::{TripIntent, TripPace},
};
use crate::services::distance_service::{haversine_km, proximity_score};

const DEFAULT_SHORTLIST_SIZE: usize = 20;
const DEFAULT_RESULT_LIMIT: usize = 5;
const DEFAULT_AVAILABILITY_TIMEOUT_MS: u64 = 3000;

const MAX_INTEREST_SCORE: f64 = 3.0;
const MAX_RATING_SCORE: f64 = 2.0;
const RATING_COUNT_CAP: u32 = 50;
const BUDGET_TOLERANCE: f64 = 1.2;
const FAST_PACE_MAX_MINUTES: u32 = 120;
const RELAXED_PACE_MIN_MINUTES: u32 = 180;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    /// Candidates kept per listing type before availability enrichment
    pub shortlist_size: usize,
    /// Ids returned per listing type
    pub result_limit: usize,
    /// Per-lookup bound applied to the availability store
    pub availability_timeout_ms: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            shortlist_size: DEFAULT_SHORTLIST_SIZE,
            result_limit: DEFAULT_RESULT_LIMIT,
            availability_timeout_ms: DEFAULT_AVAILABILITY_TIMEOUT_MS,
        }
    }
}

impl ScoringConfig {
    /// Create config from environment variables or use defaults. The
    /// shortlist and result sizes may only be lowered.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            shortlist_size: std::env::var("RECOMMEND_SHORTLIST_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n: &usize| *n > 0)
                .map(|n| n.min(DEFAULT_SHORTLIST_SIZE))
                .unwrap_or(defaults.shortlist_size),
            result_limit: std::env::var("RECOMMEND_RESULT_LIMIT")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n: &usize| *n > 0)
                .map(|n| n.min(DEFAULT_RESULT_LIMIT))
                .unwrap_or(defaults.result_limit),
            availability_timeout_ms: std::env::var("AVAILABILITY_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.availability_timeout_ms),
        }
    }

    pub fn availability_timeout(&self) -> Duration {
        Duration::from_millis(self.availability_timeout_ms)
    }
}

/// Heuristic scoring of a listing against a traveler's trip intent.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecommendationScorer;

impl RecommendationScorer {
    pub fn new() -> Self {
        Self
    }

    /// Whether a listing may be recommended at all for this trip.
    pub fn is_eligible(&self, listing: &CandidateListing, intent: &TripIntent) -> bool {
        if !listing.active {
            return false;
        }
        if listing.city.trim().to_lowercase() != intent.destination_city.trim().to_lowercase() {
            return false;
        }
        match intent.group_size {
            Some(group_size) => group_size <= listing.max_people,
            None => true,
        }
    }

    /// Score everything except availability, which needs a store lookup.
    pub fn base_breakdown(
        &self,
        listing: &CandidateListing,
        intent: &TripIntent,
    ) -> ScoreBreakdown {
        ScoreBreakdown {
            interest_score: self.score_interests(listing, &intent.normalized_interests()),
            budget_score: self.score_budget(listing, intent.budget_per_day),
            pace_score: self.score_pace(listing, intent.pace.as_ref()),
            rating_score: self.score_rating(listing),
            distance_score: self.score_distance(listing, intent),
            availability_score: 0.0,
        }
    }

    /// One point per interest token found in the category or the listing
    /// text, capped at three.
    fn score_interests(&self, listing: &CandidateListing, interests: &[String]) -> f64 {
        if interests.is_empty() {
            return 0.0;
        }

        let category = listing
            .category
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        let text = format!("{} {}", listing.title, listing.description)
            .trim()
            .to_lowercase();

        let matches = interests
            .iter()
            .filter(|token| category.contains(token.as_str()) || text.contains(token.as_str()))
            .count();

        (matches as f64).min(MAX_INTEREST_SCORE)
    }

    fn score_budget(&self, listing: &CandidateListing, budget_per_day: Option<f64>) -> f64 {
        let Some(budget) = budget_per_day else {
            return 0.0;
        };

        if listing.price <= budget {
            2.0
        } else if listing.price <= budget * BUDGET_TOLERANCE {
            1.0
        } else {
            -1.5
        }
    }

    fn score_pace(&self, listing: &CandidateListing, pace: Option<&TripPace>) -> f64 {
        match pace {
            Some(TripPace::Fast) => {
                if listing.duration_minutes <= FAST_PACE_MAX_MINUTES {
                    0.8
                } else {
                    -0.4
                }
            }
            Some(TripPace::Relaxed) => {
                if listing.duration_minutes >= RELAXED_PACE_MIN_MINUTES {
                    0.8
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    }

    fn score_rating(&self, listing: &CandidateListing) -> f64 {
        let avg = listing.rating_avg.unwrap_or(0.0);
        let count = listing.rating_count.unwrap_or(0).min(RATING_COUNT_CAP);

        (avg * 0.3 + count as f64 * 0.01).min(MAX_RATING_SCORE)
    }

    fn score_distance(&self, listing: &CandidateListing, intent: &TripIntent) -> f64 {
        match (intent.traveler_location, listing.coordinates()) {
            (Some(traveler), Some(coords)) => {
                proximity_score(haversine_km(traveler.as_tuple(), coords))
            }
            _ => 0.0,
        }
    }

    /// Boost for how many open slots the listing has within the trip dates.
    pub fn availability_boost(&self, open_slots: u64) -> f64 {
        match open_slots {
            0 => -0.8,
            1 => 0.6,
            2..=3 => 1.2,
            _ => 1.6,
        }
    }
}
