use mbo_core::models::{Feature, NumberAffinity, SignalKind, SubscriberProfile};
use mbo_core::traits::{ExtractionContext, ISignalExtractor};

use crate::calendar::{self, Planet};

const BASE: f64 = 45.0;
const CAP: f64 = 85.0;

/// Time-based signal from the planetary hour of the session and the lunar phase.
/// A pure function of date and session; never degrades.
pub struct CyclicalExtractor;

impl ISignalExtractor for CyclicalExtractor {
    fn kind(&self) -> SignalKind {
        SignalKind::Cyclical
    }

    fn name(&self) -> &'static str {
        "cyclical"
    }

    fn extract(&self, _profile: &SubscriberProfile, ctx: &ExtractionContext<'_>) -> Feature {
        let hour = ctx.session.hour();
        let ruler = calendar::planetary_hour(ctx.date, hour);
        let phase = calendar::moon_phase(calendar::at_hour(ctx.date, hour));
        let value = (BASE + ruler.hour_bonus() + phase.bonus()).min(CAP);

        let mut affinity = NumberAffinity::uniform(0.25);
        for n in ctx.rule.main.iter() {
            affinity.main.insert(n, ruler_affinity(n, ruler));
        }
        if let Some(bonus) = ctx.rule.bonus {
            for n in bonus.iter() {
                affinity.bonus.insert(n, ruler_affinity(n, ruler));
            }
        }

        Feature::active(self.kind(), self.name(), value, affinity)
            .with_explanation(format!("{ruler:?} hour, {phase:?} moon"))
    }
}

/// Numbers congruent to the ruler's Chaldean index (mod 7) score 1.0,
/// falling by a quarter per step of circular distance.
pub fn ruler_affinity(n: u32, ruler: Planet) -> f64 {
    let r = ruler.index() as u32;
    let diff = (n % 7 + 7 - r) % 7;
    let distance = diff.min(7 - diff);
    1.0 - f64::from(distance) / 4.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ruler_affinity_peaks_on_congruent_numbers() {
        // Jupiter has index 1.
        assert_eq!(ruler_affinity(1, Planet::Jupiter), 1.0);
        assert_eq!(ruler_affinity(8, Planet::Jupiter), 1.0);
        assert_eq!(ruler_affinity(2, Planet::Jupiter), 0.75);
        assert_eq!(ruler_affinity(0, Planet::Jupiter), 0.75);
        assert_eq!(ruler_affinity(4, Planet::Jupiter), 0.25);
    }
}
