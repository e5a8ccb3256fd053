mod common;

use chrono::{Datelike, Duration};
use tripcore_api::{
    models::pricing::{DiscountKind, GroupTier, LastMinuteDiscount, PricingRuleSet, PromoCampaign},
    services::pricing_service::PricingService,
};

use common::fixed_now;

fn start_weekday() -> u8 {
    (fixed_now() + Duration::days(3)).weekday().number_from_monday() as u8
}

#[test]
fn test_end_to_end_without_rules() {
    let breakdown = PricingService::compute_total(100.0, fixed_now(), 3, None, fixed_now());
    assert_eq!(breakdown.total, 300.0);
    assert_eq!(breakdown.applied_percent_off, 0.0);
    assert!(breakdown.applied_discount_label.is_none());
}

#[test]
fn test_no_rule_set_identity() {
    for (price, people) in [(0.0, 1), (12.5, 4), (99.99, 7), (1000.0, 20)] {
        let breakdown =
            PricingService::compute_total(price, fixed_now(), people, None, fixed_now());
        assert_eq!(breakdown.total, price * people as f64);
    }
}

#[test]
fn test_group_beats_weekday() {
    let start = fixed_now() + Duration::days(3);
    let mut rules = PricingRuleSet {
        group_tiers: vec![GroupTier {
            id: "g4".to_string(),
            min_people: 4,
            percent_off: 20.0,
        }],
        ..Default::default()
    };
    rules.weekday_discounts.insert(start_weekday(), 10.0);

    let breakdown = PricingService::compute_total(100.0, start, 5, Some(&rules), fixed_now());
    assert_eq!(breakdown.applied_percent_off, 20.0);
    assert_eq!(breakdown.applied_discount_label.as_deref(), Some("Group"));
    assert_eq!(breakdown.total, 400.0);
}

#[test]
fn test_best_discount_label_follows_winner() {
    let start = fixed_now() + Duration::hours(5);
    let rules = PricingRuleSet {
        last_minute_discount: Some(LastMinuteDiscount {
            hours_before_start: 12,
            percent_off: 10.0,
        }),
        promo_campaigns: vec![PromoCampaign {
            id: "spring".to_string(),
            name: "Spring flash sale".to_string(),
            start_instant: "2025-03-01T00:00:00Z".to_string(),
            end_instant: "2025-03-31T00:00:00Z".to_string(),
            percent_off: 25.0,
            code: Some("SPRING25".to_string()),
        }],
        ..Default::default()
    };

    let breakdown = PricingService::compute_total(80.0, start, 2, Some(&rules), fixed_now());
    assert_eq!(breakdown.applied_percent_off, 25.0);
    assert_eq!(breakdown.applied_discount_label.as_deref(), Some("Spring flash sale"));
    assert_eq!(breakdown.applied_discount_kind, Some(DiscountKind::Promo));
    assert_eq!(breakdown.total, 120.0);

    let candidates = PricingService::applicable_discounts(&rules, start, 2, fixed_now());
    assert_eq!(candidates.len(), 2);
}

#[test]
fn test_out_of_range_percent_is_clamped() {
    let start = fixed_now() + Duration::days(3);
    let mut over = PricingRuleSet::default();
    over.weekday_discounts.insert(start_weekday(), 150.0);
    let mut capped = PricingRuleSet::default();
    capped.weekday_discounts.insert(start_weekday(), 100.0);

    let a = PricingService::compute_total(60.0, start, 2, Some(&over), fixed_now());
    let b = PricingService::compute_total(60.0, start, 2, Some(&capped), fixed_now());
    assert_eq!(a, b);
    assert_eq!(a.total, 0.0);

    let negative = PricingRuleSet {
        group_tiers: vec![GroupTier {
            id: "neg".to_string(),
            min_people: 1,
            percent_off: -30.0,
        }],
        ..Default::default()
    };
    let breakdown = PricingService::compute_total(60.0, start, 2, Some(&negative), fixed_now());
    assert_eq!(breakdown.applied_percent_off, 0.0);
    assert_eq!(breakdown.total, 120.0);
}

#[test]
fn test_group_tiers_are_monotonic_in_headcount() {
    let rules = PricingRuleSet {
        group_tiers: vec![
            GroupTier {
                id: "a".to_string(),
                min_people: 3,
                percent_off: 5.0,
            },
            GroupTier {
                id: "b".to_string(),
                min_people: 6,
                percent_off: 12.0,
            },
            GroupTier {
                id: "c".to_string(),
                min_people: 10,
                percent_off: 8.0,
            },
        ],
        ..Default::default()
    };

    let mut previous = 0.0;
    for people in 1..=15 {
        let breakdown =
            PricingService::compute_total(40.0, fixed_now(), people, Some(&rules), fixed_now());
        assert!(
            breakdown.applied_percent_off >= previous,
            "discount dropped at {} people",
            people
        );
        previous = breakdown.applied_percent_off;
    }
    assert_eq!(previous, 12.0);
}

#[test]
fn test_compute_total_is_idempotent() {
    let start = fixed_now() + Duration::hours(30);
    let mut rules = PricingRuleSet {
        last_minute_discount: Some(LastMinuteDiscount {
            hours_before_start: 48,
            percent_off: 18.0,
        }),
        group_tiers: vec![GroupTier {
            id: "g".to_string(),
            min_people: 2,
            percent_off: 7.0,
        }],
        ..Default::default()
    };
    rules.weekday_discounts.insert(3, 9.0);

    let first = PricingService::compute_total(75.0, start, 4, Some(&rules), fixed_now());
    let second = PricingService::compute_total(75.0, start, 4, Some(&rules), fixed_now());
    assert_eq!(first, second);
    assert_eq!(first.applied_discount_kind, Some(DiscountKind::LastMinute));
}
