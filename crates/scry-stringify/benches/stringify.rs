use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scry_mirror::{MirrorValue, ObjectKind, Snapshot};
use scry_stringify::stringify;

fn nested_array(depth: usize, width: usize) -> Snapshot {
    let root = Snapshot::array();
    let mut current = root.clone();
    for _ in 0..depth {
        for i in 0..width {
            current.push(i as f64);
        }
        let next = Snapshot::array();
        current.push(next.handle());
        current = next;
    }
    root
}

fn bench_nested_arrays(c: &mut Criterion) {
    let arr = nested_array(64, 8);
    let value = MirrorValue::Object(arr.handle());
    c.bench_function("stringify_nested_arrays", |b| {
        b.iter(|| stringify(black_box(&value)))
    });
}

fn bench_flat_array(c: &mut Criterion) {
    let arr = Snapshot::array();
    for i in 0..1024 {
        arr.push(i as f64);
    }
    let value = MirrorValue::Object(arr.handle());
    c.bench_function("stringify_flat_array", |b| {
        b.iter(|| stringify(black_box(&value)))
    });
}

fn bench_error(c: &mut Criterion) {
    let err = Snapshot::new(ObjectKind::TypeError);
    err.set("name", "TypeError");
    err.set("message", "bad input");
    let value = MirrorValue::Object(err.handle());
    c.bench_function("stringify_error", |b| {
        b.iter(|| stringify(black_box(&value)))
    });
}

criterion_group!(benches, bench_nested_arrays, bench_flat_array, bench_error);
criterion_main!(benches);
