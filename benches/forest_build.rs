use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use docstree::pipeline::recompute;
use docstree::tree::{build, RemoteRecord};

/// A listing shaped like one API page: folders `fanout` wide, files spread
/// across them, every tenth file shared into a second folder.
fn listing(size: usize, fanout: usize) -> Vec<RemoteRecord> {
    let folders = (size / 10).max(1);
    let mut records = Vec::with_capacity(size);
    for i in 0..folders {
        let record = RemoteRecord::folder(format!("d{}", i), format!("Folder {}", i));
        let record = if i < fanout {
            record
        } else {
            record.with_parents([format!("d{}", (i - 1) / fanout)])
        };
        records.push(record);
    }
    for i in 0..size.saturating_sub(folders) {
        let home = format!("d{}", i % folders);
        let record = RemoteRecord::file(format!("f{}", i), format!("report-{}.pdf", i));
        let record = if i % 10 == 0 {
            record.with_parents([home, format!("d{}", (i / 10) % folders)])
        } else {
            record.with_parents([home])
        };
        records.push(record);
    }
    records
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for size in [50usize, 200, 1000] {
        let records = listing(size, 4);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| build(black_box(records), "root"))
        });
    }
    group.finish();
}

fn bench_recompute(c: &mut Criterion) {
    let records = listing(200, 4);
    let mut group = c.benchmark_group("recompute");
    for query in ["", "report-1", "zzz"] {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, query| {
            b.iter(|| recompute(black_box(&records), "root", query))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_recompute);
criterion_main!(benches);
