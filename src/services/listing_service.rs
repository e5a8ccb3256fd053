use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};
use std::sync::Arc;

use crate::error::ListingError;
use crate::models::listing::{CandidateListing, ListingDocument, ListingType};

/// Read-only access to marketplace listings.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Active listings of one type located in `city` (case-insensitive).
    async fn active_listings(
        &self,
        listing_type: ListingType,
        city: &str,
    ) -> Result<Vec<CandidateListing>, ListingError>;

    async fn ping(&self) -> Result<(), ListingError>;
}

pub struct MongoListingSource {
    client: Arc<Client>,
    database: String,
}

impl MongoListingSource {
    pub fn new(client: Arc<Client>, database: impl Into<String>) -> Self {
        Self {
            client,
            database: database.into(),
        }
    }

    fn collection(&self, listing_type: ListingType) -> Collection<ListingDocument> {
        self.client
            .database(&self.database)
            .collection(listing_type.collection_name())
    }
}

/// Anchored, escaped pattern so "Rome" never matches "Romeoville".
fn city_pattern(city: &str) -> String {
    format!("^{}$", regex::escape(city.trim()))
}

#[async_trait]
impl ListingSource for MongoListingSource {
    async fn active_listings(
        &self,
        listing_type: ListingType,
        city: &str,
    ) -> Result<Vec<CandidateListing>, ListingError> {
        let filter = doc! {
            "active": true,
            "city": { "$regex": city_pattern(city), "$options": "i" },
        };

        let cursor = self.collection(listing_type).find(filter).await?;
        let documents: Vec<ListingDocument> = cursor.try_collect().await?;
        log::debug!(
            "Fetched {} {} listings for {}",
            documents.len(),
            listing_type,
            city
        );

        Ok(documents.into_iter().map(CandidateListing::from).collect())
    }

    async fn ping(&self) -> Result<(), ListingError> {
        self.client
            .database(&self.database)
            .run_command(doc! {"ping": 1})
            .await?;
        Ok(())
    }
}

/// Listings held in memory, keyed by type.
#[derive(Debug, Clone, Default)]
pub struct InMemoryListingSource {
    tours: Vec<CandidateListing>,
    experiences: Vec<CandidateListing>,
    unavailable: bool,
}

impl InMemoryListingSource {
    pub fn new(tours: Vec<CandidateListing>, experiences: Vec<CandidateListing>) -> Self {
        Self {
            tours,
            experiences,
            unavailable: false,
        }
    }

    /// A store whose every call fails.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ListingSource for InMemoryListingSource {
    async fn active_listings(
        &self,
        listing_type: ListingType,
        city: &str,
    ) -> Result<Vec<CandidateListing>, ListingError> {
        if self.unavailable {
            return Err(ListingError::Unavailable("in-memory store offline".to_string()));
        }

        let listings = match listing_type {
            ListingType::Tour => &self.tours,
            ListingType::Experience => &self.experiences,
        };
        let city = city.trim().to_lowercase();

        Ok(listings
            .iter()
            .filter(|listing| listing.active && listing.city.trim().to_lowercase() == city)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), ListingError> {
        if self.unavailable {
            return Err(ListingError::Unavailable("in-memory store offline".to_string()));
        }
        Ok(())
    }
}
