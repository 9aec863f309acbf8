use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Timelike};
use mbo_core::models::{Feature, GameRule, NumberAffinity, SignalKind, SubscriberProfile, Tier};
use mbo_core::traits::{ExtractionContext, ISignalExtractor};

use crate::calendar;

const BASE: f64 = 50.0;
const ALIGNMENT_POINTS: f64 = 4.0;
const LIFE_PATH_POINTS: f64 = 2.0;
const NATAL_RULER_POINTS: f64 = 6.0;
const CAP: f64 = 80.0;

const FAVORITE_AFFINITY: f64 = 1.0;
const BIRTH_NUMBER_AFFINITY: f64 = 0.9;
const LIFE_PATH_AFFINITY: f64 = 0.7;
const BACKGROUND_AFFINITY: f64 = 0.3;

/// Birth-derived signal: numerology alignment with the target date plus the
/// subscriber's favorite numbers. Degraded when no birth date is known.
pub struct PersonalExtractor;

impl ISignalExtractor for PersonalExtractor {
    fn kind(&self) -> SignalKind {
        SignalKind::Personal
    }

    fn name(&self) -> &'static str {
        "personal"
    }

    /// Only personalized tiers carry birth data.
    fn supports(&self, tier: Tier, _rule: &GameRule) -> bool {
        tier.requires_birth_data()
    }

    fn extract(&self, profile: &SubscriberProfile, ctx: &ExtractionContext<'_>) -> Feature {
        let Some(birth) = profile.birth.as_ref() else {
            return Feature::degraded(self.kind(), self.name(), "no birth date on profile");
        };

        let birth_numbers = date_numbers(birth.date);
        let target_numbers = date_numbers(ctx.date);
        let birth_set: BTreeSet<u32> = birth_numbers.into_iter().collect();
        let target_set: BTreeSet<u32> = target_numbers.into_iter().collect();
        let alignments = birth_set.intersection(&target_set).count();
        let life_path = life_path(birth.date);

        let mut value = BASE
            + alignments as f64 * ALIGNMENT_POINTS
            + f64::from(life_path % 9) * LIFE_PATH_POINTS;
        let natal_match = birth.time.is_some_and(|t| {
            calendar::planetary_hour(birth.date, t.hour())
                == calendar::planetary_hour(ctx.date, ctx.session.hour())
        });
        if natal_match {
            value += NATAL_RULER_POINTS;
        }
        let value = value.min(CAP);

        let mut affinity = NumberAffinity::uniform(BACKGROUND_AFFINITY);
        let candidates_for = |n: u32| -> Vec<u32> {
            if ctx.rule.positional {
                // Digit games use the digits of each number.
                let mut digits = Vec::new();
                let mut m = n;
                loop {
                    digits.push(m % 10);
                    m /= 10;
                    if m == 0 {
                        break;
                    }
                }
                digits
            } else {
                vec![n]
            }
        };
        let life_path = life_path.max(1);
        for n in ctx.rule.main.iter().filter(|n| *n > 0 && n % life_path == 0) {
            affinity.main.insert(n, LIFE_PATH_AFFINITY);
        }
        for n in birth_numbers.iter().flat_map(|&n| candidates_for(n)) {
            if ctx.rule.main.contains(n) {
                affinity.main.insert(n, BIRTH_NUMBER_AFFINITY);
            }
        }
        for &n in profile.favorites_for(ctx.game) {
            if ctx.rule.main.contains(n) {
                affinity.main.insert(n, FAVORITE_AFFINITY);
            }
        }
        if let Some(bonus) = ctx.rule.bonus {
            for n in birth_numbers.iter().copied().filter(|&n| bonus.contains(n)) {
                affinity.bonus.insert(n, BIRTH_NUMBER_AFFINITY);
            }
        }

        Feature::active(self.kind(), self.name(), value, affinity).with_explanation(format!(
            "life path {life_path}, {alignments} date alignments{}",
            if natal_match { ", natal ruler match" } else { "" }
        ))
    }
}

/// `[day, month, year % 100, (day + month) % 10]`
pub fn date_numbers(date: NaiveDate) -> [u32; 4] {
    let (day, month) = (date.day(), date.month());
    let year = date.year().rem_euclid(100) as u32;
    [day, month, year, (day + month) % 10]
}

/// Digit sum of the full date, reduced to a single digit.
pub fn life_path(date: NaiveDate) -> u32 {
    let mut total =
        digit_sum(date.day()) + digit_sum(date.month()) + digit_sum(date.year().unsigned_abs());
    while total > 9 {
        total = digit_sum(total);
    }
    total
}

fn digit_sum(mut n: u32) -> u32 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn life_path_reduces_to_one_digit() {
        // 1985-07-14: 1+4+7+1+9+8+5 = 35 -> 8
        assert_eq!(life_path(NaiveDate::from_ymd_opt(1985, 7, 14).unwrap()), 8);
        // 1990-02-03: 3+2+1+9+9+0 = 24 -> 6
        assert_eq!(life_path(NaiveDate::from_ymd_opt(1990, 2, 3).unwrap()), 6);
    }

    #[test]
    fn date_numbers_match_the_documented_layout() {
        let d = NaiveDate::from_ymd_opt(1985, 7, 14).unwrap();
        assert_eq!(date_numbers(d), [14, 7, 85, 1]);
    }
}
