use std::collections::BTreeMap;

use mbo_core::models::{Feature, NumberAffinity, SignalKind, SubscriberProfile};
use mbo_core::traits::{ExtractionContext, ISignalExtractor};

/// Draw count at which the frequency signal is fully trusted.
const SUFFICIENT_DRAWS: f64 = 30.0;

/// Statistical signal: how often each number appeared over the lookback window.
pub struct FrequencyExtractor;

impl ISignalExtractor for FrequencyExtractor {
    fn kind(&self) -> SignalKind {
        SignalKind::Frequency
    }

    fn name(&self) -> &'static str {
        "frequency"
    }

    fn extract(&self, _profile: &SubscriberProfile, ctx: &ExtractionContext<'_>) -> Feature {
        let draws = ctx
            .history
            .draws_before(ctx.game, ctx.session, ctx.date, ctx.lookback);
        if draws.is_empty() {
            return Feature::degraded(self.kind(), self.name(), "no draws in lookback window");
        }

        let mut main_counts: BTreeMap<u32, u32> = BTreeMap::new();
        let mut bonus_counts: BTreeMap<u32, u32> = BTreeMap::new();
        for draw in &draws {
            for &n in &draw.numbers {
                *main_counts.entry(n).or_default() += 1;
            }
            if let Some(b) = draw.bonus {
                *bonus_counts.entry(b).or_default() += 1;
            }
        }

        let mut affinity = NumberAffinity::uniform(0.0);
        affinity.main = normalized(&main_counts);
        affinity.bonus = normalized(&bonus_counts);

        // Concentration of the top `main_count` numbers over the uniform expectation.
        let total: u32 = main_counts.values().sum();
        let expected = f64::from(total) / ctx.rule.main.len() as f64;
        let mut counts: Vec<u32> = main_counts.values().copied().collect();
        counts.sort_unstable_by(|a, b| b.cmp(a));
        let k = ctx.rule.main_count.min(counts.len()).max(1);
        let top_mean = counts.iter().take(k).map(|&c| f64::from(c)).sum::<f64>() / k as f64;
        let ratio = if expected > 0.0 { top_mean / expected } else { 1.0 };
        let raw = (50.0 + 25.0 * (ratio - 1.0)).clamp(0.0, 100.0);
        let sufficiency = (draws.len() as f64 / SUFFICIENT_DRAWS).min(1.0);
        let value = 50.0 + (raw - 50.0) * sufficiency;

        Feature::active(self.kind(), self.name(), value, affinity).with_explanation(format!(
            "{} draws, top-{k} concentration {ratio:.2}x uniform",
            draws.len()
        ))
    }
}

fn normalized(counts: &BTreeMap<u32, u32>) -> BTreeMap<u32, f64> {
    let max = counts.values().copied().max().unwrap_or(0);
    if max == 0 {
        return BTreeMap::new();
    }
    counts
        .iter()
        .map(|(&n, &c)| (n, f64::from(c) / f64::from(max)))
        .collect()
}
