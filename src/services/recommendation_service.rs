//! Trip recommendations.
//!
//! Each listing type runs the same pipeline independently: filter, base
//! score, shortlist, availability enrichment, final rank. Availability lookups
//! for a shortlist are issued concurrently and tours and experiences are
//! ranked concurrently with each other. A failed lookup only costs that one
//! listing its availability boost.

use futures::future::join_all;
use log::{debug, info, warn};
use std::{cmp::Ordering, sync::Arc};

use crate::models::{
    listing::{CandidateListing, DateRange, ListingType},
    recommendation::{RecommendationResult, ScoredCandidate},
    trip::TripIntent,
};
use crate::services::{
    availability_service::AvailabilitySource,
    recommendation_scoring::{RecommendationScorer, ScoringConfig},
};

pub struct RecommendationEngine {
    scorer: RecommendationScorer,
    config: ScoringConfig,
    availability: Arc<dyn AvailabilitySource>,
}

impl RecommendationEngine {
    pub fn with_config(availability: Arc<dyn AvailabilitySource>, config: ScoringConfig) -> Self {
        info!("RecommendationEngine initialized with config: {:?}", config);
        Self {
            scorer: RecommendationScorer::new(),
            config,
            availability,
        }
    }

    /// Best tour and experience ids for the trip, each list capped at the
    /// configured result limit. Never fails.
    pub async fn recommend(
        &self,
        intent: &TripIntent,
        tours: &[CandidateListing],
        experiences: &[CandidateListing],
    ) -> RecommendationResult {
        let (ranked_tours, ranked_experiences) = futures::join!(
            self.rank(intent, ListingType::Tour, tours),
            self.rank(intent, ListingType::Experience, experiences),
        );

        RecommendationResult {
            tour_ids: ranked_tours.into_iter().map(|c| c.listing.id).collect(),
            experience_ids: ranked_experiences.into_iter().map(|c| c.listing.id).collect(),
        }
    }

    /// Full pipeline for one listing type, returning the scored winners.
    pub async fn rank(
        &self,
        intent: &TripIntent,
        listing_type: ListingType,
        candidates: &[CandidateListing],
    ) -> Vec<ScoredCandidate> {
        let shortlist = self.shortlist(intent, candidates);
        if shortlist.is_empty() {
            return Vec::new();
        }

        let range = intent.date_range();
        let counts = join_all(
            shortlist
                .iter()
                .map(|candidate| self.open_slots(listing_type, &candidate.listing.id, &range)),
        )
        .await;

        let mut enriched: Vec<ScoredCandidate> = shortlist
            .into_iter()
            .zip(counts)
            .map(|(mut candidate, count)| {
                let boost = self.scorer.availability_boost(count);
                candidate.availability_count = count;
                candidate.breakdown.availability_score = boost;
                candidate.score += boost;
                candidate
            })
            .collect();

        enriched.sort_by(final_order);
        enriched.truncate(self.config.result_limit);

        debug!(
            "Ranked {} {} candidates for {}: {:?}",
            candidates.len(),
            listing_type,
            intent.destination_city,
            enriched
                .iter()
                .map(|c| (c.listing.id.as_str(), c.score))
                .collect::<Vec<_>>()
        );

        enriched
    }

    /// Eligible candidates with base scores, best first, bounded so the
    /// availability fan-out stays small.
    fn shortlist(
        &self,
        intent: &TripIntent,
        candidates: &[CandidateListing],
    ) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = candidates
            .iter()
            .filter(|listing| self.scorer.is_eligible(listing, intent))
            .map(|listing| {
                let breakdown = self.scorer.base_breakdown(listing, intent);
                ScoredCandidate {
                    listing: listing.clone(),
                    score: breakdown.base_total(),
                    availability_count: 0,
                    breakdown,
                }
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(self.config.shortlist_size);
        scored
    }

    async fn open_slots(
        &self,
        listing_type: ListingType,
        listing_id: &str,
        range: &DateRange,
    ) -> u64 {
        match self
            .availability
            .open_slot_count(listing_type, listing_id, range)
            .await
        {
            Ok(count) => count,
            Err(e) => {
                warn!(
                    "Availability lookup failed for {} {}: {}. Treating as no open slots.",
                    listing_type, listing_id, e
                );
                0
            }
        }
    }
}

/// Score descending, then rating average and rating count descending.
fn final_order(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            let (a_avg, a_count) = a.listing.rating_key();
            let (b_avg, b_count) = b.listing.rating_key();
            b_avg
                .partial_cmp(&a_avg)
                .unwrap_or(Ordering::Equal)
                .then(b_count.cmp(&a_count))
        })
}
