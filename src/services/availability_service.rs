use async_trait::async_trait;
use mongodb::{bson::doc, bson::Document, Client, Collection};
use std::{sync::Arc, time::Duration};

use crate::error::AvailabilityError;
use crate::models::listing::{AvailabilityRecord, AvailabilityStatus, DateRange, ListingType};

/// Source of open, unreserved slot counts for a listing.
///
/// Implementations are called concurrently from the recommendation engine.
#[async_trait]
pub trait AvailabilitySource: Send + Sync {
    async fn open_slot_count(
        &self,
        listing_type: ListingType,
        listing_id: &str,
        range: &DateRange,
    ) -> Result<u64, AvailabilityError>;
}

pub struct MongoAvailabilitySource {
    client: Arc<Client>,
    database: String,
}

impl MongoAvailabilitySource {
    pub fn new(client: Arc<Client>, database: impl Into<String>) -> Self {
        Self {
            client,
            database: database.into(),
        }
    }

    fn collection(&self) -> Collection<Document> {
        self.client.database(&self.database).collection("Availability")
    }
}

#[async_trait]
impl AvailabilitySource for MongoAvailabilitySource {
    async fn open_slot_count(
        &self,
        listing_type: ListingType,
        listing_id: &str,
        range: &DateRange,
    ) -> Result<u64, AvailabilityError> {
        let (start, end) = range.to_bson();
        let filter = doc! {
            "listing_type": listing_type.as_str(),
            "listing_id": listing_id,
            "is_reserved": false,
            "status": AvailabilityStatus::Open.as_str(),
            "start_time": { "$gte": start, "$lte": end },
        };

        let count = self.collection().count_documents(filter).await?;
        Ok(count)
    }
}

/// Availability backed by a fixed set of records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAvailabilitySource {
    records: Vec<AvailabilityRecord>,
}

impl InMemoryAvailabilitySource {
    pub fn new(records: Vec<AvailabilityRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl AvailabilitySource for InMemoryAvailabilitySource {
    async fn open_slot_count(
        &self,
        listing_type: ListingType,
        listing_id: &str,
        range: &DateRange,
    ) -> Result<u64, AvailabilityError> {
        let count = self
            .records
            .iter()
            .filter(|record| {
                record.listing_type == listing_type
                    && record.listing_id == listing_id
                    && record.is_open_slot()
                    && range.contains(&record.start_time)
            })
            .count();
        Ok(count as u64)
    }
}

/// Bounds every lookup of the wrapped source by `timeout`.
pub struct TimeoutAvailability<S> {
    inner: S,
    timeout: Duration,
}

impl<S> TimeoutAvailability<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl<S: AvailabilitySource> AvailabilitySource for TimeoutAvailability<S> {
    async fn open_slot_count(
        &self,
        listing_type: ListingType,
        listing_id: &str,
        range: &DateRange,
    ) -> Result<u64, AvailabilityError> {
        match tokio::time::timeout(
            self.timeout,
            self.inner.open_slot_count(listing_type, listing_id, range),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(AvailabilityError::Timeout(self.timeout.as_millis() as u64)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(
        id: &str,
        day: u32,
        is_reserved: bool,
        status: AvailabilityStatus,
    ) -> AvailabilityRecord {
        AvailabilityRecord {
            listing_type: ListingType::Tour,
            listing_id: id.to_string(),
            is_reserved,
            status,
            start_time: Utc.with_ymd_and_hms(2025, 6, day, 10, 0, 0).unwrap(),
        }
    }

    fn june_range() -> DateRange {
        DateRange::new(
            Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 6, 7, 23, 59, 59).unwrap(),
        )
    }

    #[actix_rt::test]
    async fn test_in_memory_counts_only_open_slots_in_range() {
        let source = InMemoryAvailabilitySource::new(vec![
            record("t1", 2, false, AvailabilityStatus::Open),
            record("t1", 3, false, AvailabilityStatus::Open),
            record("t1", 4, true, AvailabilityStatus::Open),
            record("t1", 5, false, AvailabilityStatus::Closed),
            record("t1", 20, false, AvailabilityStatus::Open),
            record("t2", 2, false, AvailabilityStatus::Open),
        ]);

        let count = source
            .open_slot_count(ListingType::Tour, "t1", &june_range())
            .await
            .unwrap();
        assert_eq!(count, 2);

        let count = source
            .open_slot_count(ListingType::Experience, "t1", &june_range())
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    struct SlowSource;

    #[async_trait]
    impl AvailabilitySource for SlowSource {
        async fn open_slot_count(
            &self,
            _listing_type: ListingType,
            _listing_id: &str,
            _range: &DateRange,
        ) -> Result<u64, AvailabilityError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(9)
        }
    }

    #[actix_rt::test]
    async fn test_timeout_wrapper_reports_timeout() {
        let source = TimeoutAvailability::new(SlowSource, Duration::from_millis(20));
        let result = source
            .open_slot_count(ListingType::Tour, "t1", &june_range())
            .await;
        assert!(matches!(result, Err(AvailabilityError::Timeout(20))));
    }
}
