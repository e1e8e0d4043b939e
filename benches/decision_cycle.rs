use criterion::{black_box, criterion_group, criterion_main, Criterion};

use stratagem::sandbox::{OpponentKind, Skirmish};
use stratagem::AdaptiveEngine;

fn warmed_engine() -> (AdaptiveEngine, Skirmish) {
    let mut engine = AdaptiveEngine::default();
    let mut skirmish = Skirmish::new(OpponentKind::Mixed, 7);
    for _ in 0..8 {
        let plan = engine.decide(&skirmish.snapshot());
        let outcome = skirmish.play_turn(&plan.actions);
        let _ = engine.complete_turn(&outcome);
    }
    (engine, skirmish)
}

fn bench_decide(c: &mut Criterion) {
    let (engine, skirmish) = warmed_engine();
    let snapshot = skirmish.snapshot();

    c.bench_function("decide", |b| {
        b.iter_batched(
            || engine.clone(),
            |mut engine| black_box(engine.decide(black_box(&snapshot))),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_full_turn(c: &mut Criterion) {
    let (engine, skirmish) = warmed_engine();

    c.bench_function("decide_play_learn", |b| {
        b.iter_batched(
            || (engine.clone(), skirmish.clone()),
            |(mut engine, mut skirmish)| {
                let plan = engine.decide(&skirmish.snapshot());
                let outcome = skirmish.play_turn(&plan.actions);
                black_box(engine.complete_turn(&outcome).ok())
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_decide, bench_full_turn);
criterion_main!(benches);
