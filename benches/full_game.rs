use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use white_elephant::{run_batch, GameConfig, GiftDefinition, GiftId, WhiteElephant};

fn classic_game(c: &mut Criterion) {
    let config = GameConfig::default();
    c.bench_function("classic_game", |b| {
        b.iter_batched(
            || config.clone(),
            |config| WhiteElephant::new(config).map(|g| g.play()),
            BatchSize::SmallInput,
        )
    });
}

fn large_table(c: &mut Criterion) {
    let gifts = (1..=200)
        .map(|id| GiftDefinition::new(GiftId(id), format!("Gift {id}"), 10 + id % 90))
        .collect();
    let config = GameConfig::default().with_players(200).with_gifts(gifts);
    c.bench_function("table_200", |b| {
        b.iter(|| WhiteElephant::new(black_box(config.clone())).map(|g| g.play()))
    });
}

fn batch(c: &mut Criterion) {
    let config = GameConfig::default();
    c.bench_function("batch_100", |b| b.iter(|| run_batch(&config, 100, black_box(7))));
}

criterion_group!(benches, classic_game, large_table, batch);
criterion_main!(benches);
