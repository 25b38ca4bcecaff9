use std::time::Duration;

use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use tokio::runtime::Runtime;

use strike_limit::Guard;
use strike_limit::MemoryStore;

fn bench_guard(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("guard");

    let clean = Guard::new(MemoryStore::new());
    group.bench_function("check_client/clean", |b| {
        b.to_async(&rt)
            .iter(|| async { clean.check_client("198.51.100.1").await.unwrap() })
    });

    let locked = Guard::new(MemoryStore::new());
    rt.block_on(async {
        locked
            .set_lockout("198.51.100.1", Some(Duration::from_secs(3600)))
            .await
            .unwrap();
    });
    group.bench_function("check_client/locked", |b| {
        b.to_async(&rt)
            .iter(|| async { locked.check_client("198.51.100.1").await.unwrap() })
    });

    let ledger = Guard::new(MemoryStore::new());
    group.bench_function("record_attempt", |b| {
        b.to_async(&rt)
            .iter(|| async { ledger.record_attempt("198.51.100.1").await.unwrap() })
    });

    group.finish();
}

criterion_group!(benches, bench_guard);
criterion_main!(benches);
