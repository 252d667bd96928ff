//! Benchmarks for formatting and markup rendering
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use kis_dashboard::controller::render_holdings;
use kis_dashboard::render::{holdings_rows, log_lines};
use kis_dashboard::{format_currency, format_date, Country, Document, Holding};

fn create_holdings(count: usize) -> Vec<Holding> {
    (0..count)
        .map(|i| Holding {
            symbol: format!("{:06}", i),
            name: format!("종목 <{}>", i),
            quantity: (i % 50 + 1) as f64,
            avg_price: 10_000.0 + i as f64,
            current_price: 10_500.0 - i as f64,
            profit_loss: 500.0 - 2.0 * i as f64,
            profit_loss_rate: 5.0 - 0.02 * i as f64,
            country: None,
        })
        .collect()
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");

    group.bench_function("currency_krw", |b| {
        b.iter(|| format_currency(black_box(Some(-1_234_567_890.0)), Country::Kor))
    });

    group.bench_function("currency_usd", |b| {
        b.iter(|| format_currency(black_box(Some(98_765.4321)), Country::Usa))
    });

    group.bench_function("date", |b| {
        b.iter(|| format_date(black_box("2024-01-15T14:30:00.123456")))
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for size in [10, 100, 1000] {
        let holdings = create_holdings(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("holdings_rows_{}", size), |b| {
            b.iter(|| holdings_rows(black_box(&holdings), Country::Usa))
        });

        group.bench_function(format!("render_holdings_{}", size), |b| {
            let mut doc = Document::dashboard_page();
            b.iter(|| render_holdings(&mut doc, black_box(&holdings), Country::Kor).unwrap())
        });
    }

    let lines: Vec<String> = (0..500)
        .map(|i| format!("2024-01-15 14:30:{:02} INFO order <{}> filled\n", i % 60, i))
        .collect();
    group.bench_function("log_lines_500", |b| b.iter(|| log_lines(black_box(&lines))));

    group.finish();
}

criterion_group!(benches, bench_format, bench_render);
criterion_main!(benches);
