use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use macro_sets_core::{
    DeepCopy, InMemoryHost, MacroIcon, MacroInfo, MacroRecord, MacroSet, MacroSetStore,
    MacroSetsDb, SlotScope, Table, Value,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

fn large_db(set_count: usize) -> MacroSetsDb {
    let mut rng = StdRng::seed_from_u64(7);
    let mut db = MacroSetsDb::new();
    for i in 0..set_count {
        let macros: Vec<_> = (0..rng.gen_range(1..=150))
            .map(|m| {
                MacroRecord::new(
                    format!("macro_{m:03}"),
                    MacroIcon::FileId(rng.gen_range(100_000..200_000)),
                    format!("/cast Spell {m}\n/say benchmark set {i}"),
                )
                .per_character(m >= 120)
            })
            .collect();
        let mut set = MacroSet::new(SlotScope::Both, macros);
        set.action_bar_slots
            .insert("macro_000".into(), vec![1, rng.gen_range(2..=180)]);
        db.insert(format!("set_{i:04}"), set);
    }
    db
}

fn nested_table(depth: usize, width: usize) -> Table {
    let mut table = Table::new();
    for i in 0..width {
        table.set(i as i64, format!("leaf {i}"));
    }
    if depth == 0 {
        return table;
    }
    table.set("child", Value::from(nested_table(depth - 1, width)));
    let mut meta = Table::new();
    meta.set("__index", "fallback");
    table.with_metatable(meta)
}

fn full_host() -> InMemoryHost {
    let mut host = InMemoryHost::default();
    for index in 1..=150 {
        host.insert_macro(
            index,
            MacroInfo::new(format!("macro_{index:03}"), MacroIcon::DYNAMIC, "/dance"),
        );
    }
    host
}

fn bench_backup_large_db(c: &mut Criterion) {
    let db = large_db(500);
    let mut store = MacroSetStore::new(InMemoryHost::default(), Vec::<String>::new());
    *store.sets_mut() = db;

    c.bench_function("backup/500_sets", |b| {
        b.iter(|| black_box(store.backup_macro_sets()))
    });
}

fn bench_deep_copy_nested_table(c: &mut Criterion) {
    let table = nested_table(32, 16);
    c.bench_function("deep_copy/table_depth_32", |b| {
        b.iter(|| black_box(table.deep_copy()))
    });
}

fn bench_save_and_load_full_host(c: &mut Criterion) {
    c.bench_function("save_load/150_macros", |b| {
        b.iter_batched(
            || MacroSetStore::new(full_host(), Vec::<String>::new()),
            |mut store| {
                store.save_macro_set("bench", Some(SlotScope::Both)).unwrap();
                black_box(store.load_macro_set("bench").unwrap());
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_list_large_db(c: &mut Criterion) {
    let db = large_db(500);
    c.bench_function("list/500_sets", |b| {
        b.iter_batched(
            || {
                let mut store = MacroSetStore::new(InMemoryHost::default(), Vec::<String>::new());
                *store.sets_mut() = db.clone();
                store
            },
            |mut store| black_box(store.list_macro_sets()),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    benches,
    bench_backup_large_db,
    bench_deep_copy_nested_table,
    bench_save_and_load_full_host,
    bench_list_large_db
);
criterion_main!(benches);
