#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use tracecheck_trace::segment::extract_segments_from_reader;
use tracecheck_trace::{aggregate, record::parse_records, BoundaryRule, RecordSchema};

const START: &str = "ITEM: ATOMS id";
const END: &str = "ITEM: TIMESTEP";

/// A desorption-style dump: 2000 atoms, one disappearing per snapshot.
fn desorption_dump(atoms: usize, snapshots: usize) -> String {
    let mut out = String::new();
    for step in 0..snapshots {
        out.push_str(&format!("{END}\n{step}\n{START}\n"));
        for id in (step + 1)..=atoms {
            out.push_str(&format!("{id}\n"));
        }
    }
    out
}

fn bench_extract_and_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_dump");

    for snapshots in [10, 100] {
        let dump = desorption_dump(2000, snapshots);
        group.throughput(criterion::Throughput::Bytes(dump.len() as u64));
        group.bench_function(format!("snapshots_{}", snapshots), |b| {
            b.iter(|| {
                let segments =
                    extract_segments_from_reader(black_box(dump.as_bytes()), START, END).unwrap();
                let records = parse_records(
                    RecordSchema::Id,
                    segments.iter().flat_map(|s| s.lines.iter()),
                )
                .unwrap();
                black_box(aggregate(records, BoundaryRule::Descending))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extract_and_aggregate);
criterion_main!(benches);
