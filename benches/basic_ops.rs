use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use fakebigtable::{Client, GcRule, ReadRowsOptions, RowFilter, Table};

fn setup_table(rule: GcRule) -> Table {
    let client = Client::new("bench");
    let table = client.instance("i").table("t");
    table.create([("cf", rule)]).unwrap();
    table
}

fn load(table: &Table, rows: usize, value: &[u8]) {
    for i in 0..rows {
        let mut row = table.direct_row(format!("key{i:010}"));
        row.set_cell("cf", "q", value);
        row.commit().unwrap();
    }
}

fn bench_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit");
    group.throughput(Throughput::Elements(1));

    // Small values (100 bytes)
    group.bench_function("set_cell_100b", |b| {
        let table = setup_table(GcRule::max_versions(1));
        let value = vec![b'x'; 100];
        let mut i = 0u64;
        b.iter(|| {
            let mut row = table.direct_row(format!("key{i:010}"));
            row.set_cell("cf", "q", value.as_slice());
            black_box(row.commit().unwrap());
            i += 1;
        });
    });

    // Medium values (1KB)
    group.bench_function("set_cell_1kb", |b| {
        let table = setup_table(GcRule::max_versions(1));
        let value = vec![b'x'; 1024];
        let mut i = 0u64;
        b.iter(|| {
            let mut row = table.direct_row(format!("key{i:010}"));
            row.set_cell("cf", "q", value.as_slice());
            black_box(row.commit().unwrap());
            i += 1;
        });
    });

    // Ten columns per row
    group.bench_function("set_10_cells", |b| {
        let table = setup_table(GcRule::max_versions(1));
        let value = vec![b'x'; 100];
        let mut i = 0u64;
        b.iter(|| {
            let mut row = table.direct_row(format!("key{i:010}"));
            for q in 0..10 {
                row.set_cell("cf", format!("q{q}"), value.as_slice());
            }
            black_box(row.commit().unwrap());
            i += 1;
        });
    });

    // Overwriting one hot row keeps a single version
    group.bench_function("overwrite_hot_row", |b| {
        let table = setup_table(GcRule::max_versions(1));
        let value = vec![b'x'; 100];
        b.iter(|| {
            let mut row = table.direct_row("hot");
            row.set_cell("cf", "q", value.as_slice());
            black_box(row.commit().unwrap());
        });
    });

    group.finish();
}

fn bench_read_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_row");
    group.throughput(Throughput::Elements(1));

    group.bench_function("read_row_hit", |b| {
        let table = setup_table(GcRule::None);
        load(&table, 1000, &[b'x'; 1024]);

        let mut i = 0;
        b.iter(|| {
            let key = format!("key{:010}", i % 1000);
            black_box(table.read_row(key, None).unwrap());
            i += 1;
        });
    });

    group.bench_function("read_row_miss", |b| {
        let table = setup_table(GcRule::None);
        load(&table, 1000, &[b'x'; 1024]);

        let mut i = 0;
        b.iter(|| {
            let key = format!("notfound{i:010}");
            black_box(table.read_row(key, None).unwrap());
            i += 1;
        });
    });

    group.bench_function("read_row_filtered", |b| {
        let table = setup_table(GcRule::None);
        load(&table, 1000, &[b'x'; 1024]);
        let filter = RowFilter::chain([
            RowFilter::column_qualifier_regex("q").unwrap(),
            RowFilter::cells_column_limit(1),
        ]);

        let mut i = 0;
        b.iter(|| {
            let key = format!("key{:010}", i % 1000);
            black_box(table.read_row(key, Some(&filter)).unwrap());
            i += 1;
        });
    });

    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");

    let table = setup_table(GcRule::None);
    load(&table, 10_000, &[b'x'; 100]);

    group.throughput(Throughput::Elements(10_000));
    group.bench_function("full_table", |b| {
        b.iter(|| {
            let count = table.read_rows(ReadRowsOptions::new()).unwrap().count();
            black_box(count);
        });
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("range_100", |b| {
        b.iter(|| {
            let options = ReadRowsOptions::new()
                .start_key("key0000005000")
                .end_key("key0000005100");
            let count = table.read_rows(options).unwrap().count();
            black_box(count);
        });
    });

    group.bench_function("limit_100", |b| {
        b.iter(|| {
            let count = table
                .read_rows(ReadRowsOptions::new().limit(100))
                .unwrap()
                .count();
            black_box(count);
        });
    });

    group.bench_function("row_key_regex", |b| {
        let filter = RowFilter::row_key_regex("key00000050.*").unwrap();
        b.iter(|| {
            let options = ReadRowsOptions::new().filter(filter.clone());
            let count = table.read_rows(options).unwrap().count();
            black_box(count);
        });
    });

    group.finish();
}

fn bench_mixed_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.throughput(Throughput::Elements(1));

    // 80% reads, 20% writes
    group.bench_function("read_heavy", |b| {
        let table = setup_table(GcRule::max_versions(3));
        load(&table, 1000, &[b'x'; 100]);
        let value = vec![b'y'; 100];

        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key{:010}", i % 1000);
            if i % 5 == 0 {
                let mut row = table.direct_row(key);
                row.set_cell("cf", "q", value.as_slice());
                black_box(row.commit().unwrap());
            } else {
                black_box(table.read_row(key, None).unwrap());
            }
            i += 1;
        });
    });

    group.bench_function("increment", |b| {
        let table = setup_table(GcRule::max_versions(1));
        b.iter(|| {
            let mut row = table.append_row("counter");
            row.increment_cell_value("cf", "n", 1);
            black_box(row.commit().unwrap());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_commit,
    bench_read_row,
    bench_scan,
    bench_mixed_workload
);
criterion_main!(benches);
