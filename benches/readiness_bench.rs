use chrono::{DateTime, Days, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use readyrs::engine::ReadinessEngine;
use readyrs::models::{DomsSurvey, ExerciseType, ProgressionRequest, SessionLog};
use readyrs::progression::ProgressionCalculator;
use readyrs::readiness::{ReadinessCalculator, ReadinessInputs};
use readyrs::store::MemoryStore;

/// Performance benchmarks for the readiness engine
///
/// These benchmarks test evaluation latency with varying history sizes
/// to ensure per-request cost stays flat.

fn bench_as_of() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 28, 8, 0, 0).unwrap()
}

fn seeded_store(days: u64) -> MemoryStore {
    let mut store = MemoryStore::new();
    let today = bench_as_of().date_naive();

    for back in 0..days {
        let date = today.checked_sub_days(Days::new(back)).unwrap();
        store.add_session(
            "athlete-1",
            SessionLog {
                date,
                session_rpe: Some(6.5),
                total_load: dec!(500) + Decimal::from(back % 7) * dec!(40),
                rpe_load: None,
            },
        );
    }
    store.add_survey(
        "athlete-1",
        DomsSurvey {
            date: today,
            chest: 2,
            back: 3,
            legs: 4,
            shoulders: 2,
            arms: 1,
            core: 2,
            overall_soreness: 3,
            sleep_quality: Some(7),
            energy_level: Some(6),
            motivation: Some(8),
        },
    );
    store
}

fn bench_readiness_index(c: &mut Criterion) {
    let inputs = ReadinessInputs {
        sleep_score: Some(75.0),
        hrv_delta: Some(-8.0),
        acwr: 1.12,
        last_rpe: Some(7.0),
        last_soreness: Some(3.5),
    };

    c.bench_function("readiness_index", |b| {
        b.iter(|| ReadinessCalculator::index(black_box(&inputs)));
    });
}

fn bench_progression_suggestion(c: &mut Criterion) {
    c.bench_function("progression_suggest", |b| {
        b.iter(|| {
            ProgressionCalculator::suggest(
                black_box(0.67),
                black_box(1.35),
                black_box(dec!(180)),
                ExerciseType::Compound,
                Some(8.0),
                Some(4.0),
            )
        });
    });
}

fn bench_full_evaluation(c: &mut Criterion) {
    let engine = ReadinessEngine::new();
    let request = ProgressionRequest {
        user_id: "athlete-1".to_string(),
        current_load: dec!(100),
        exercise_type: ExerciseType::Compound,
        days_since_last: 1,
    };

    let mut group = c.benchmark_group("Engine Evaluation");

    for &days in &[7, 30, 90, 365] {
        let store = seeded_store(days);

        group.throughput(Throughput::Elements(days));
        group.bench_with_input(
            BenchmarkId::new("evaluate", days),
            &store,
            |b, store| {
                b.iter(|| engine.evaluate(store, black_box(&request), bench_as_of()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_readiness_index,
    bench_progression_suggestion,
    bench_full_evaluation
);
criterion_main!(benches);
