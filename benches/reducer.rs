//! Benchmarks for the project/timer reducer.
//!
//! These benchmarks measure dispatch throughput for timer sessions and
//! inventory updates over the demo store.

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use looma_tui::store::{reduce, Action, AppState, ManualClock, Store};
use std::sync::Arc;

fn bench_timer_session(c: &mut Criterion) {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    c.bench_function("timer_session_60_ticks", |b| {
        b.iter(|| {
            let mut state = AppState::seeded();
            state = reduce(
                &state,
                Action::StartTimer {
                    project_id: "1".to_string(),
                    at: start,
                },
            )
            .unwrap();
            for s in 1..=60 {
                state = reduce(
                    &state,
                    Action::Tick {
                        at: start + Duration::seconds(black_box(s)),
                    },
                )
                .unwrap();
            }
            reduce(
                &state,
                Action::StopTimer {
                    at: start + Duration::seconds(60),
                },
            )
            .unwrap()
        })
    });
}

fn bench_stock_adjustments(c: &mut Criterion) {
    c.bench_function("adjust_stock_100", |b| {
        b.iter(|| {
            let mut state = AppState::seeded();
            for i in 0..100 {
                state = reduce(
                    &state,
                    Action::AdjustStock {
                        material_id: black_box("3").to_string(),
                        quantity: black_box(i as f64),
                    },
                )
                .unwrap();
            }
            state
        })
    });
}

fn bench_store_timer_service(c: &mut Criterion) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
    c.bench_function("store_pause_resume_10", |b| {
        b.iter(|| {
            let mut store = Store::with_clock(AppState::seeded(), Arc::new(clock.clone()));
            let mut timer = store.timer();
            timer.start("1").unwrap();
            for _ in 0..10 {
                clock.advance_secs(5);
                timer.pause().unwrap();
                timer.resume().unwrap();
            }
            timer.stop().unwrap();
            store
        })
    });
}

criterion_group!(
    benches,
    bench_timer_session,
    bench_stock_adjustments,
    bench_store_timer_service
);
criterion_main!(benches);
