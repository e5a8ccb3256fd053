use actix_web::{web, HttpResponse, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::pricing::{DiscountCandidate, PricingBreakdown, PricingRuleSet};
use crate::services::pricing_service::PricingService;

#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub base_per_person: f64,
    pub start: DateTime<Utc>,
    pub people_count: i64,
    #[serde(default)]
    pub rule_set: Option<PricingRuleSet>,
    #[serde(default)]
    pub include_candidates: bool,
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    #[serde(flatten)]
    pub breakdown: PricingBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<DiscountCandidate>>,
}

/*
    /api/pricing/quote
*/
pub async fn quote(input: web::Json<QuoteRequest>) -> impl Responder {
    let request = input.into_inner();
    let now = Utc::now();

    let breakdown = PricingService::compute_total(
        request.base_per_person,
        request.start,
        request.people_count,
        request.rule_set.as_ref(),
        now,
    );

    let candidates = match (&request.rule_set, request.include_candidates) {
        (Some(rules), true) => Some(PricingService::applicable_discounts(
            rules,
            request.start,
            breakdown.people_count,
            now,
        )),
        (None, true) => Some(Vec::new()),
        _ => None,
    };

    HttpResponse::Ok().json(QuoteResponse {
        breakdown,
        candidates,
    })
}
