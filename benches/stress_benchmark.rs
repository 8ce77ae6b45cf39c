use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal_macros::dec;
use stress_engine::core::country::{CountryCode, ShockTable};
use stress_engine::data::generate::{generate_random_book, BookConfig};
use stress_engine::engine::calculator::StressTestCalculator;

fn shocks() -> ShockTable {
    let mut table = ShockTable::new();
    table.set(CountryCode::new("GB"), dec!(-5.12));
    table.set(CountryCode::new("US"), dec!(-10));
    table.set(CountryCode::new("DE"), dec!(2));
    table
}

fn bench_stress_1k_loans(c: &mut Criterion) {
    let config = BookConfig {
        portfolio_count: 10,
        loans_per_portfolio: 100,
        ..Default::default()
    };
    let book = generate_random_book(&config);
    let table = shocks();

    c.bench_function("stress_1k_loans", |b| {
        b.iter(|| StressTestCalculator::calculate_book(black_box(&table), black_box(&book)))
    });
}

fn bench_stress_10k_loans(c: &mut Criterion) {
    let config = BookConfig {
        portfolio_count: 50,
        loans_per_portfolio: 200,
        ..Default::default()
    };
    let book = generate_random_book(&config);
    let table = shocks();

    c.bench_function("stress_10k_loans", |b| {
        b.iter(|| StressTestCalculator::calculate_book(black_box(&table), black_box(&book)))
    });
}

fn bench_stress_50k_loans(c: &mut Criterion) {
    let config = BookConfig {
        portfolio_count: 100,
        loans_per_portfolio: 500,
        ..Default::default()
    };
    let book = generate_random_book(&config);
    let table = shocks();

    c.bench_function("stress_50k_loans", |b| {
        b.iter(|| StressTestCalculator::calculate_book(black_box(&table), black_box(&book)))
    });
}

criterion_group!(
    benches,
    bench_stress_1k_loans,
    bench_stress_10k_loans,
    bench_stress_50k_loans
);
criterion_main!(benches);
