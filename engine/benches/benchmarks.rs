//! Performance benchmarks for circulation-engine

use chrono::Duration;
use circulation_engine::{CirculationEngine, ManualClock, NewBook};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn stocked_engine(size: u64) -> (CirculationEngine<ManualClock>, ManualClock) {
    let clock = ManualClock::at_millis(1_706_745_600_000);
    let mut engine = CirculationEngine::new(clock.clone());

    for i in 0..size {
        let draft = NewBook::new(
            format!("Title {}", i),
            format!("Author {}", i % 97),
            format!("Genre {}", i % 7),
            format!("978{:010}", i),
        );
        let _ = engine.add_book(draft);
    }

    (engine, clock)
}

fn bench_catalog_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_operations");

    group.bench_function("add_book", |b| {
        let (mut engine, _) = stocked_engine(0);
        b.iter(|| engine.add_book(black_box(NewBook::new("Dune", "Herbert", "Sci-Fi", "42"))))
    });

    group.bench_function("borrow_and_return", |b| {
        let (mut engine, _) = stocked_engine(1000);
        b.iter(|| {
            let _ = engine.borrow_book(black_box(500), "Bob");
            engine.return_book(black_box(500))
        })
    });

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");

    for size in [100u64, 1000, 10000] {
        let (engine, _) = stocked_engine(size);

        group.bench_with_input(BenchmarkId::new("search_books", size), &size, |b, _| {
            b.iter(|| engine.search_books(black_box("author 13")))
        });

        group.bench_with_input(BenchmarkId::new("books_by_genre", size), &size, |b, _| {
            b.iter(|| engine.books_by_genre(black_box(Some("genre 3"))))
        });
    }

    group.finish();
}

fn bench_reports(c: &mut Criterion) {
    let mut group = c.benchmark_group("reports");

    for size in [100u64, 1000] {
        let (mut engine, clock) = stocked_engine(size);
        // Lend every third book, then let all loans run late
        for id in (1..=size).step_by(3) {
            let _ = engine.borrow_book_for(id, "Bob", 1);
        }
        clock.advance(Duration::days(10));

        group.bench_with_input(BenchmarkId::new("report", size), &size, |b, _| {
            b.iter(|| engine.report())
        });

        group.bench_with_input(BenchmarkId::new("stats", size), &size, |b, _| {
            b.iter(|| engine.stats())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_catalog_operations, bench_queries, bench_reports);
criterion_main!(benches);
