use mbo_core::models::{Feature, NumberAffinity, NumberRange, SignalKind, SubscriberProfile};
use mbo_core::traits::{ExtractionContext, ISignalExtractor};

const NEIGHBOR_AFFINITY: f64 = 1.0;
const REPEAT_AFFINITY: f64 = 0.4;
const BACKGROUND_AFFINITY: f64 = 0.2;

/// Structural signal: how often a draw lands on ±1 neighbors of the draw before it.
pub struct AdjacencyExtractor;

impl ISignalExtractor for AdjacencyExtractor {
    fn kind(&self) -> SignalKind {
        SignalKind::Adjacency
    }

    fn name(&self) -> &'static str {
        "adjacency"
    }

    fn extract(&self, _profile: &SubscriberProfile, ctx: &ExtractionContext<'_>) -> Feature {
        let draws = ctx
            .history
            .draws_before(ctx.game, ctx.session, ctx.date, ctx.lookback);
        if draws.len() < 2 {
            return Feature::degraded(self.kind(), self.name(), "fewer than two draws in history");
        }

        // Draws are most recent first; compare each draw with the one before it.
        let (mut hits, mut total) = (0usize, 0usize);
        for pair in draws.windows(2) {
            let (newer, older) = (pair[0], pair[1]);
            total += newer.numbers.len();
            hits += newer
                .numbers
                .iter()
                .filter(|&&n| older.numbers.iter().any(|&o| n.abs_diff(o) == 1))
                .count();
        }
        let rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };
        let expected = uniform_neighbor_rate(ctx.rule.main, ctx.rule.main_count);
        let value = if expected > 0.0 { 50.0 * rate / expected } else { 50.0 };

        let latest = draws[0];
        let mut affinity = NumberAffinity::uniform(BACKGROUND_AFFINITY);
        for &n in &latest.numbers {
            affinity.main.entry(n).or_insert(REPEAT_AFFINITY);
        }
        for &n in &latest.numbers {
            for m in neighbors(n, ctx.rule.main) {
                affinity.main.insert(m, NEIGHBOR_AFFINITY);
            }
        }
        if let (Some(b), Some(range)) = (latest.bonus, ctx.rule.bonus) {
            for m in neighbors(b, range) {
                affinity.bonus.insert(m, NEIGHBOR_AFFINITY);
            }
        }

        Feature::active(self.kind(), self.name(), value, affinity).with_explanation(format!(
            "neighbor rate {rate:.2} vs {expected:.2} uniform over {} draws",
            draws.len()
        ))
    }
}

/// Chance a uniformly drawn number sits next to one of `count` drawn numbers.
fn uniform_neighbor_rate(range: NumberRange, count: usize) -> f64 {
    let len = range.len() as f64;
    if len <= 1.0 {
        return 0.0;
    }
    (2.0 * count as f64 / len).min(1.0)
}

fn neighbors(n: u32, range: NumberRange) -> impl Iterator<Item = u32> {
    [n.checked_sub(1), n.checked_add(1)]
        .into_iter()
        .flatten()
        .filter(move |m| range.contains(*m))
}
