//! Criterion benchmarks for the generation pipeline.
//!
//! - single subscriber, one digit game (3 sessions)
//! - single subscriber, every premium game
//! - batch of 200 subscribers across tiers

use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};

use mbo_core::config::EngineConfig;
use mbo_core::models::GameId;
use mbo_engine::{BatchRequest, Engine, GenerationRequest, ProfileSource, RunInputs};
use test_fixtures::{basic_profile, date, premium_profile, standard_profile, HistoryBuilder};

fn setup() -> (Engine, RunInputs) {
    let engine = Engine::from_config(EngineConfig::default());
    let until = date(2025, 3, 1);
    let history = HistoryBuilder::new()
        .daily("CASH3", until, 180)
        .daily("CASH4", until, 180)
        .daily("POWERBALL", until, 180)
        .daily("MEGAMILLIONS", until, 180)
        .daily("CASH4LIFE", until, 180)
        .build();
    let run_at = Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap();
    let inputs = RunInputs::new(engine.new_weight_store().snapshot(), history, run_at);
    (engine, inputs)
}

fn bench_single(c: &mut Criterion) {
    let (engine, inputs) = setup();
    let profile = premium_profile("P1");
    let cash3 = GenerationRequest::new(date(2025, 3, 1)).with_games([GameId::new("CASH3")]);
    let all = GenerationRequest::new(date(2025, 3, 1));

    c.bench_function("generate_cash3", |b| {
        b.iter(|| engine.generate(&profile, &cash3, &inputs).unwrap())
    });
    c.bench_function("generate_all_games", |b| {
        b.iter(|| engine.generate(&profile, &all, &inputs).unwrap())
    });
}

fn bench_batch(c: &mut Criterion) {
    let (engine, inputs) = setup();
    let request = GenerationRequest::new(date(2025, 3, 1));
    let requests: Vec<BatchRequest> = (0..200)
        .map(|i| {
            let profile = match i % 3 {
                0 => basic_profile(&format!("B{i}")),
                1 => standard_profile(&format!("S{i}")),
                _ => premium_profile(&format!("P{i}")),
            };
            BatchRequest {
                profile: ProfileSource::Profile(profile),
                request: request.clone(),
            }
        })
        .collect();

    c.bench_function("generate_batch_200", |b| {
        b.iter(|| engine.generate_batch(&requests, &inputs))
    });
}

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
