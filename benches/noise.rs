use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use simplex_heightmap::procgen::terrain::TerrainGen;
use simplex_heightmap::procgen::{generate_layer, DVec3, NoiseField};

fn bench_eval(c: &mut Criterion) {
    let field = NoiseField::new(1);

    c.bench_function("noise_2d", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x += 0.37;
            black_box(field.noise_2d(black_box(x), 11.5, 25.0, 25.0))
        });
    });

    c.bench_function("noise_3d", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x += 0.37;
            black_box(field.noise_3d(black_box(x), 11.5, -4.25, 25.0, 25.0, 25.0))
        });
    });
}

fn bench_layer(c: &mut Criterion) {
    let mut group = c.benchmark_group("layer");
    for &side in [128u32, 512].iter() {
        let flat = TerrainGen::default();
        group.bench_with_input(BenchmarkId::new("flat", side), &side, |b, &side| {
            b.iter(|| generate_layer(&flat, side, side, 0, Some(8)));
        });

        let volume = TerrainGen::new(1, DVec3::splat(25.0));
        group.bench_with_input(BenchmarkId::new("slice", side), &side, |b, &side| {
            b.iter(|| generate_layer(&volume, side, side, 3, Some(8)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_eval, bench_layer);
criterion_main!(benches);
