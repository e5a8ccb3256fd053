use std::sync::Arc;

use crate::services::{
    listing_service::ListingSource, recommendation_service::RecommendationEngine,
};

/// Shared with every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub listings: Arc<dyn ListingSource>,
    pub recommender: Arc<RecommendationEngine>,
}

impl AppState {
    pub fn new(listings: Arc<dyn ListingSource>, recommender: RecommendationEngine) -> Self {
        Self {
            listings,
            recommender: Arc::new(recommender),
        }
    }
}
