use simplex_heightmap::config::GenConfig;
use simplex_heightmap::export::{check_targets, export_png};
use simplex_heightmap::procgen::terrain::TerrainGen;
use simplex_heightmap::procgen::{generate_layer, generate_stack, UVec3};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::tempdir;

#[test]
fn stack_to_png_files() {
    let dir = tempdir().unwrap();
    let config = GenConfig {
        width: 24,
        height: 16,
        depth: Some(3),
        seed: 1,
        levels: Some(4),
        output: dir.path().join("stack.png"),
        ..Default::default()
    };
    config.validate().unwrap();

    let paths = config.output_paths();
    check_targets(&paths, config.force).unwrap();

    let gen = TerrainGen::new(config.seed, config.feature_sizes());
    let calls = AtomicUsize::new(0);
    let layers = generate_stack(&gen, config.size(), config.levels, |_, total| {
        assert_eq!(total, 3);
        calls.fetch_add(1, Ordering::Relaxed);
    });
    assert_eq!(calls.load(Ordering::Relaxed), 3);

    for (layer, path) in layers.iter().zip(paths.iter()) {
        // four levels over [0, 255] leave only multiples of 63.75, truncated
        assert!(layer
            .data
            .iter()
            .all(|p| [0u8, 63, 127, 191, 255].contains(p)));
        export_png(layer, path).unwrap();
    }

    for path in &paths {
        let img = image::open(path).unwrap().to_luma8();
        assert_eq!(img.dimensions(), (24, 16));
    }

    // a second run refuses to clobber the first
    assert!(check_targets(&paths, false).is_err());
}

#[test]
fn flat_layer_is_deterministic() {
    let a = generate_layer(&TerrainGen::default(), 64, 64, 0, None);
    let b = generate_layer(&TerrainGen::default(), 64, 64, 0, None);
    assert_eq!(a, b);

    let distinct = {
        let mut values = a.data.clone();
        values.sort_unstable();
        values.dedup();
        values.len()
    };
    assert!(distinct > 1);
}

#[test]
fn stack_slices_vary() {
    let gen = TerrainGen::new(5, simplex_heightmap::procgen::DVec3::splat(8.0));
    let layers = generate_stack(&gen, UVec3::new(32, 32, 2), None, |_, _| {});
    assert_ne!(layers[0], layers[1]);
}
