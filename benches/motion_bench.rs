//! Benchmarks for the CPU side of the scene: scroll and frame updates, and
//! procedural mesh generation.
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use stardrift::{
    motion::{advance_frame, apply_scroll},
    options::Options,
    renderer::mesh::MeshData,
    scene::{scatter_stars, SceneState},
};

fn scroll_benchmark(c: &mut Criterion) {
    let options = Options::default();
    let mut state = SceneState::new(&options, 16.0 / 9.0, &mut StdRng::seed_from_u64(7));
    let mut offset = 0;

    c.bench_function("apply_scroll", |b| {
        b.iter(|| {
            offset = (offset - 40) % 4000;
            apply_scroll(&mut state, black_box(offset), &options.motion);
        });
    });
}

fn frame_benchmark(c: &mut Criterion) {
    let options = Options::default();
    let mut state = SceneState::new(&options, 16.0 / 9.0, &mut StdRng::seed_from_u64(7));

    c.bench_function("advance_frame", |b| {
        b.iter(|| advance_frame(black_box(&mut state), &options.motion));
    });
}

fn mesh_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("mesh_generation");
    group.bench_function("torus_16x100", |b| {
        b.iter(|| black_box(MeshData::torus(10.0, 3.0, 16, 100)));
    });
    group.bench_function("sphere_32x32", |b| {
        b.iter(|| black_box(MeshData::sphere(3.0, 32, 32)));
    });
    group.finish();
}

fn starfield_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("scatter_stars");
    for count in [200, 1000, 5000] {
        group.bench_function(format!("{count}_stars"), |b| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| black_box(scatter_stars(&mut rng, count, 100.0)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    scroll_benchmark,
    frame_benchmark,
    mesh_benchmark,
    starfield_benchmark
);
criterion_main!(benches);
