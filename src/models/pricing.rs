use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Discount configuration attached to a single listing.
///
/// Instants are kept as RFC 3339 strings exactly as the listing store holds
/// them; they are parsed lazily when a rule is evaluated.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct PricingRuleSet {
    /// ISO weekday (1 = Monday ... 7 = Sunday) to percent off.
    #[serde(default)]
    pub weekday_discounts: BTreeMap<u8, f64>,
    #[serde(default)]
    pub last_minute_discount: Option<LastMinuteDiscount>,
    #[serde(default)]
    pub seasonal_discounts: Vec<SeasonalDiscount>,
    #[serde(default)]
    pub group_tiers: Vec<GroupTier>,
    #[serde(default)]
    pub promo_campaigns: Vec<PromoCampaign>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LastMinuteDiscount {
    pub hours_before_start: u32,
    pub percent_off: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SeasonalDiscount {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub start_instant: String,
    pub end_instant: String,
    pub percent_off: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GroupTier {
    pub id: String,
    pub min_people: u32,
    pub percent_off: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PromoCampaign {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub start_instant: String,
    pub end_instant: String,
    pub percent_off: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    Promo,
    Weekday,
    LastMinute,
    Seasonal,
    Group,
}

impl DiscountKind {
    /// Label used when a rule carries no name of its own.
    pub fn default_label(&self) -> &'static str {
        match self {
            DiscountKind::Promo => "Promo",
            DiscountKind::Weekday => "Weekday",
            DiscountKind::LastMinute => "Last minute",
            DiscountKind::Seasonal => "Seasonal",
            DiscountKind::Group => "Group",
        }
    }
}

/// One active rule competing to be the applied discount.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DiscountCandidate {
    pub kind: DiscountKind,
    pub percent_off: f64,
    pub label: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PricingBreakdown {
    pub base_per_person: f64,
    pub people_count: u32,
    pub base_total: f64,
    pub applied_percent_off: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_discount_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_discount_kind: Option<DiscountKind>,
    pub discount_amount: f64,
    pub total: f64,
}

/// Parse a rule instant. Anything that is not RFC 3339 yields `None` and the
/// owning rule is treated as inactive.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
