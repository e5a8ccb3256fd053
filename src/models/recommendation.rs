use serde::{Deserialize, Serialize};

use super::{listing::CandidateListing, trip::TripIntent};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub interest_score: f64,
    pub budget_score: f64,
    pub pace_score: f64,
    pub rating_score: f64,
    pub distance_score: f64,
    pub availability_score: f64,
}

impl ScoreBreakdown {
    pub fn base_total(&self) -> f64 {
        self.interest_score
            + self.budget_score
            + self.pace_score
            + self.rating_score
            + self.distance_score
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoredCandidate {
    pub listing: CandidateListing,
    pub score: f64,
    pub availability_count: u64,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RecommendationResult {
    pub tour_ids: Vec<String>,
    pub experience_ids: Vec<String>,
}

/// Request body for ranking caller-supplied candidates.
#[derive(Debug, Clone, Deserialize)]
pub struct RankRequest {
    pub intent: TripIntent,
    #[serde(default)]
    pub tours: Vec<CandidateListing>,
    #[serde(default)]
    pub experiences: Vec<CandidateListing>,
}
