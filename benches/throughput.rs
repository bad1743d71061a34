use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use moodlog::{
    core::store::EntryStore,
    entry::EntryDraft,
    persist::sqlite::SqliteEntryTable,
    types::{EntryDate, Mood},
};

fn dates(n: usize) -> Vec<EntryDate> {
    let base = EntryDate::from_ymd(2000, 1, 1).expect("base").as_naive();
    (0..n)
        .map(|i| {
            let d = base + chrono::Duration::days(i as i64);
            d.format("%Y-%m-%d").to_string().parse().expect("date")
        })
        .collect()
}

fn filled(store: &mut EntryStore, days: &[EntryDate]) {
    for (i, d) in days.iter().enumerate() {
        store
            .upsert(&EntryDraft::new(*d, Mood::ALL[i % Mood::ALL.len()]).with_content("bench"))
            .expect("upsert");
    }
}

fn bench_upserts(c: &mut Criterion) {
    let days = dates(3_650);
    c.bench_function("memory_upsert_10y", |b| {
        b.iter(|| {
            let mut store = EntryStore::in_memory();
            filled(&mut store, &days);
        });
    });
    c.bench_function("sqlite_upsert_1y", |b| {
        b.iter(|| {
            let table = SqliteEntryTable::open_in_memory().expect("sqlite");
            let mut store = EntryStore::new(Box::new(table));
            filled(&mut store, &days[..365]);
        });
    });
}

fn bench_month_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("month_query");
    let days = dates(3_650);
    let mut memory = EntryStore::in_memory();
    filled(&mut memory, &days);
    let mut sqlite = EntryStore::new(Box::new(SqliteEntryTable::open_in_memory().expect("sqlite")));
    filled(&mut sqlite, &days);

    for (name, store) in [("memory", &memory), ("sqlite", &sqlite)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), store, |b, store| {
            b.iter(|| {
                let _ = store.get_by_month(2005, 2).expect("month");
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_upserts, bench_month_query);
criterion_main!(benches);
