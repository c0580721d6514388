//! Scene Description Benchmarks
//!
//! Cost of building and evaluating catalog models

use amao_scene::{DetailLevel, ModelKind, RenderFlags};
use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

fn bench_build_spec(c: &mut Criterion) {
    c.bench_function("build_all_specs", |b| {
        b.iter(|| {
            for kind in ModelKind::ALL {
                black_box(kind.spec());
            }
        });
    });
}

fn bench_describe(c: &mut Criterion) {
    let mut group = c.benchmark_group("describe");

    for kind in [ModelKind::Character, ModelKind::Car, ModelKind::House] {
        let spec = kind.spec();
        group.bench_with_input(BenchmarkId::from_parameter(kind), &spec, |b, spec| {
            b.iter(|| {
                for detail in DetailLevel::all() {
                    black_box(spec.describe(detail, RenderFlags::empty()));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_spec, bench_describe);
criterion_main!(benches);
