use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use datagrid::*;
use serde_json::json;
use std::collections::HashMap;

fn dataset(size: usize) -> Vec<Record> {
    let depts = ["Info", "Math", "Physics", "Chemistry"];
    (0..size)
        .map(|i| {
            let value = json!({
                "first": format!("First{}", i),
                "last": format!("Last{}", i % 97),
                "dept": depts[i % depts.len()],
                "exp": (i % 30) as i64,
            });
            record::into_record(value).unwrap()
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_indices");
    let fields = vec![SearchField::keys(["first", "last"])];

    for size in [100, 1000, 10000].iter() {
        let records = dataset(*size);
        let mut active = HashMap::new();
        active.insert("dept".to_string(), "Math".to_string());

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                filter_indices(
                    black_box(&records),
                    black_box("first1"),
                    black_box(&active),
                    black_box(&fields),
                )
            });
        });
    }
    group.finish();
}

fn bench_dynamic_options(c: &mut Criterion) {
    let mut group = c.benchmark_group("dynamic_options");

    for size in [100, 1000, 10000].iter() {
        let records = dataset(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| dynamic_options(black_box(&records), black_box("dept")));
        });
    }
    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_indices");
    let columns = vec![ColumnDescriptor::composite("Name", ["first", "last"])];

    for size in [100, 1000, 10000].iter() {
        let records = dataset(*size);
        let all: Vec<usize> = (0..records.len()).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                sort_indices(
                    black_box(&records),
                    black_box(&columns),
                    black_box("last"),
                    Some(SortDirection::Ascending),
                    black_box(all.clone()),
                )
            });
        });
    }
    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_page_records");

    for size in [100, 1000, 10000].iter() {
        let config = GridConfig::new(vec![
            ColumnDescriptor::composite("Name", ["first", "last"]),
            ColumnDescriptor::new("Department", "dept"),
            ColumnDescriptor::new("Experience", "exp"),
        ])
        .with_search_fields(vec![SearchField::keys(["first", "last"])])
        .with_page_size(20);

        let mut grid = DataGrid::new(config, DataSource::from_records(dataset(*size)));
        grid.set_search("first");
        grid.set_sort("exp", SortDirection::Descending);
        grid.set_page(3);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(&grid).page_records());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_filter,
    bench_dynamic_options,
    bench_sort,
    bench_full_pipeline
);
criterion_main!(benches);
