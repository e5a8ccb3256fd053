use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Tour,
    Experience,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Tour => "tour",
            ListingType::Experience => "experience",
        }
    }

    /// Collection holding listings of this type in the listing store.
    pub fn collection_name(&self) -> &'static str {
        match self {
            ListingType::Tour => "Tours",
            ListingType::Experience => "Experiences",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a tour or experience as read by the recommendation pipeline.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CandidateListing {
    pub id: String,
    pub active: bool,
    pub city: String,
    pub max_people: u32,
    #[serde(default)]
    pub category: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub duration_minutes: u32,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub rating_avg: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<u32>,
}

impl CandidateListing {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    pub fn rating_key(&self) -> (f64, u32) {
        (self.rating_avg.unwrap_or(0.0), self.rating_count.unwrap_or(0))
    }
}

/// Listing document as stored in MongoDB.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ListingDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub active: bool,
    pub city: String,
    pub max_people: u32,
    #[serde(default)]
    pub category: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub duration_minutes: u32,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub rating_avg: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<u32>,
}

impl From<ListingDocument> for CandidateListing {
    fn from(doc: ListingDocument) -> Self {
        Self {
            id: doc.id.to_hex(),
            active: doc.active,
            city: doc.city,
            max_people: doc.max_people,
            category: doc.category,
            title: doc.title,
            description: doc.description,
            price: doc.price,
            duration_minutes: doc.duration_minutes,
            latitude: doc.latitude,
            longitude: doc.longitude,
            rating_avg: doc.rating_avg,
            rating_count: doc.rating_count,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Open,
    Reserved,
    Closed,
}

impl AvailabilityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityStatus::Open => "open",
            AvailabilityStatus::Reserved => "reserved",
            AvailabilityStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AvailabilityRecord {
    pub listing_type: ListingType,
    pub listing_id: String,
    pub is_reserved: bool,
    pub status: AvailabilityStatus,
    pub start_time: DateTime<Utc>,
}

impl AvailabilityRecord {
    /// A slot counts only when it is neither reserved nor closed.
    pub fn is_open_slot(&self) -> bool {
        !self.is_reserved && self.status == AvailabilityStatus::Open
    }
}

/// Inclusive instant range used for availability lookups.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.start <= *instant && *instant <= self.end
    }

    pub fn to_bson(&self) -> (bson::DateTime, bson::DateTime) {
        (
            bson::DateTime::from_millis(self.start.timestamp_millis()),
            bson::DateTime::from_millis(self.end.timestamp_millis()),
        )
    }
}
