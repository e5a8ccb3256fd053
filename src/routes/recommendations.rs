use actix_web::{web, HttpResponse};
use log::{info, warn};

use crate::error::{ListingError, ServiceError};
use crate::models::{
    listing::{CandidateListing, ListingType},
    recommendation::RankRequest,
    trip::TripIntent,
};
use crate::state::AppState;

/*
    /api/recommendations
*/
pub async fn recommend(
    state: web::Data<AppState>,
    input: web::Json<TripIntent>,
) -> Result<HttpResponse, ServiceError> {
    let intent = input.into_inner();
    intent.validate().map_err(ServiceError::BadRequest)?;

    let city = intent.destination_city.trim();
    let (tours, experiences) = futures::join!(
        state.listings.active_listings(ListingType::Tour, city),
        state.listings.active_listings(ListingType::Experience, city),
    );

    // One missing listing type still leaves something worth recommending.
    let (tours, experiences) = match (tours, experiences) {
        (Err(e), Err(_)) => return Err(ServiceError::Listing(e)),
        (tours, experiences) => (
            or_empty(ListingType::Tour, tours),
            or_empty(ListingType::Experience, experiences),
        ),
    };

    info!(
        "Recommending for {} from {} tours and {} experiences",
        intent.destination_city,
        tours.len(),
        experiences.len()
    );

    let result = state
        .recommender
        .recommend(&intent, &tours, &experiences)
        .await;
    Ok(HttpResponse::Ok().json(result))
}

/*
    /api/recommendations/rank
*/
pub async fn rank(
    state: web::Data<AppState>,
    input: web::Json<RankRequest>,
) -> Result<HttpResponse, ServiceError> {
    let request = input.into_inner();
    request.intent.validate().map_err(ServiceError::BadRequest)?;

    let result = state
        .recommender
        .recommend(&request.intent, &request.tours, &request.experiences)
        .await;
    Ok(HttpResponse::Ok().json(result))
}

fn or_empty(
    listing_type: ListingType,
    listings: Result<Vec<CandidateListing>, ListingError>,
) -> Vec<CandidateListing> {
    listings.unwrap_or_else(|e| {
        warn!("Failed to load {} listings: {}", listing_type, e);
        Vec::new()
    })
}
