use chrono::{DateTime, Datelike, Utc};

use crate::models::pricing::{
    parse_instant, DiscountCandidate, DiscountKind, PricingBreakdown, PricingRuleSet,
};

const SECONDS_PER_HOUR: i64 = 3600;

pub struct PricingService;

impl PricingService {
    /// Price a booking, applying the single best discount from `rule_set`.
    ///
    /// `now` is the wall clock used for promo and last-minute activation.
    /// Inputs are clamped rather than rejected and the call never fails.
    pub fn compute_total(
        base_per_person: f64,
        start: DateTime<Utc>,
        people_count: i64,
        rule_set: Option<&PricingRuleSet>,
        now: DateTime<Utc>,
    ) -> PricingBreakdown {
        let base_per_person = if base_per_person.is_nan() {
            0.0
        } else {
            base_per_person.max(0.0)
        };
        let people_count = people_count.clamp(1, u32::MAX as i64) as u32;
        let base_total = base_per_person * people_count as f64;

        let applied = rule_set.and_then(|rules| {
            Self::best_candidate(Self::applicable_discounts(rules, start, people_count, now))
        });

        let applied_percent_off = applied.as_ref().map(|c| c.percent_off).unwrap_or(0.0);
        let total = base_total * (1.0 - applied_percent_off / 100.0);

        PricingBreakdown {
            base_per_person,
            people_count,
            base_total,
            applied_percent_off,
            applied_discount_label: applied.as_ref().map(|c| c.label.clone()),
            applied_discount_kind: applied.as_ref().map(|c| c.kind),
            discount_amount: base_total - total,
            total,
        }
    }

    /// Every discount that is active for this booking, in evaluation order:
    /// promo, weekday, last minute, seasonal, group.
    pub fn applicable_discounts(
        rules: &PricingRuleSet,
        start: DateTime<Utc>,
        people_count: u32,
        now: DateTime<Utc>,
    ) -> Vec<DiscountCandidate> {
        let mut candidates = Vec::new();

        // Promos run on the wall clock, not the booking start.
        for promo in &rules.promo_campaigns {
            if Self::within(&promo.start_instant, &promo.end_instant, now) {
                candidates.push(DiscountCandidate {
                    kind: DiscountKind::Promo,
                    percent_off: clamp_percent(promo.percent_off),
                    label: label_or_default(&promo.name, DiscountKind::Promo),
                });
            }
        }

        let weekday = start.weekday().number_from_monday() as u8;
        if let Some(&percent_off) = rules.weekday_discounts.get(&weekday) {
            if percent_off > 0.0 {
                candidates.push(DiscountCandidate {
                    kind: DiscountKind::Weekday,
                    percent_off: clamp_percent(percent_off),
                    label: DiscountKind::Weekday.default_label().to_string(),
                });
            }
        }

        if let Some(last_minute) = &rules.last_minute_discount {
            let hours_until_start = (start - now).num_seconds().div_euclid(SECONDS_PER_HOUR);
            if (0..=last_minute.hours_before_start as i64).contains(&hours_until_start) {
                candidates.push(DiscountCandidate {
                    kind: DiscountKind::LastMinute,
                    percent_off: clamp_percent(last_minute.percent_off),
                    label: DiscountKind::LastMinute.default_label().to_string(),
                });
            }
        }

        for season in &rules.seasonal_discounts {
            if Self::within(&season.start_instant, &season.end_instant, start) {
                candidates.push(DiscountCandidate {
                    kind: DiscountKind::Seasonal,
                    percent_off: clamp_percent(season.percent_off),
                    label: label_or_default(&season.name, DiscountKind::Seasonal),
                });
            }
        }

        let best_tier = rules
            .group_tiers
            .iter()
            .filter(|tier| people_count >= tier.min_people)
            .map(|tier| clamp_percent(tier.percent_off))
            .fold(None, |best: Option<f64>, percent| match best {
                Some(current) if current >= percent => Some(current),
                _ => Some(percent),
            });
        if let Some(percent_off) = best_tier {
            candidates.push(DiscountCandidate {
                kind: DiscountKind::Group,
                percent_off,
                label: DiscountKind::Group.default_label().to_string(),
            });
        }

        candidates
    }

    /// Highest percent wins; on a tie the earliest candidate is kept.
    fn best_candidate(candidates: Vec<DiscountCandidate>) -> Option<DiscountCandidate> {
        candidates.into_iter().fold(None, |best, candidate| match best {
            Some(current) if current.percent_off >= candidate.percent_off => Some(current),
            _ => Some(candidate),
        })
    }

    fn within(start_raw: &str, end_raw: &str, instant: DateTime<Utc>) -> bool {
        match (parse_instant(start_raw), parse_instant(end_raw)) {
            (Some(start), Some(end)) => start <= instant && instant <= end,
            _ => false,
        }
    }
}

fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}

fn label_or_default(name: &str, kind: DiscountKind) -> String {
    let name = name.trim();
    if name.is_empty() {
        kind.default_label().to_string()
    } else {
        name.to_string()
    }
}
