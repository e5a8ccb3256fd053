#![allow(dead_code)]

use actix_web::{web, App};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use tripcore_api::{
    error::AvailabilityError,
    models::{
        listing::{CandidateListing, DateRange, ListingType},
        trip::TripIntent,
    },
    routes,
    services::{
        availability_service::AvailabilitySource, listing_service::ListingSource,
        recommendation_scoring::ScoringConfig, recommendation_service::RecommendationEngine,
    },
    state::AppState,
};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
}

pub fn listing(id: &str, city: &str) -> CandidateListing {
    CandidateListing {
        id: id.to_string(),
        active: true,
        city: city.to_string(),
        max_people: 10,
        category: None,
        title: format!("Listing {}", id),
        description: String::new(),
        price: 50.0,
        duration_minutes: 90,
        latitude: None,
        longitude: None,
        rating_avg: None,
        rating_count: None,
    }
}

pub fn intent(city: &str) -> TripIntent {
    TripIntent {
        destination_city: city.to_string(),
        destination_country: None,
        start_date: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2025, 6, 7, 23, 59, 59).unwrap(),
        interests: Vec::new(),
        budget_per_day: None,
        pace: None,
        group_size: None,
        traveler_location: None,
    }
}

pub fn engine(availability: Arc<dyn AvailabilitySource>) -> RecommendationEngine {
    RecommendationEngine::with_config(availability, ScoringConfig::default())
}

/// Every lookup fails.
pub struct FailingAvailability;

#[async_trait]
impl AvailabilitySource for FailingAvailability {
    async fn open_slot_count(
        &self,
        _listing_type: ListingType,
        listing_id: &str,
        _range: &DateRange,
    ) -> Result<u64, AvailabilityError> {
        Err(AvailabilityError::Unavailable(format!("no data for {}", listing_id)))
    }
}

/// Fixed slot count per listing id, zero otherwise.
pub struct FixedAvailability {
    pub counts: Vec<(String, u64)>,
}

impl FixedAvailability {
    pub fn new(counts: &[(&str, u64)]) -> Self {
        Self {
            counts: counts
                .iter()
                .map(|(id, count)| (id.to_string(), *count))
                .collect(),
        }
    }
}

#[async_trait]
impl AvailabilitySource for FixedAvailability {
    async fn open_slot_count(
        &self,
        _listing_type: ListingType,
        listing_id: &str,
        _range: &DateRange,
    ) -> Result<u64, AvailabilityError> {
        Ok(self
            .counts
            .iter()
            .find(|(id, _)| id == listing_id)
            .map(|(_, count)| *count)
            .unwrap_or(0))
    }
}

/// Records how many lookups were made and how many overlapped.
#[derive(Default)]
pub struct TrackingAvailability {
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

#[async_trait]
impl AvailabilitySource for TrackingAvailability {
    async fn open_slot_count(
        &self,
        _listing_type: ListingType,
        _listing_id: &str,
        _range: &DateRange,
    ) -> Result<u64, AvailabilityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(20)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(1)
    }
}

pub fn test_state(
    listings: Arc<dyn ListingSource>,
    availability: Arc<dyn AvailabilitySource>,
) -> AppState {
    AppState::new(listings, engine(availability))
}

pub fn create_app(
    state: AppState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(routes::configure)
}
