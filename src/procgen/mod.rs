// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

pub mod noise;
pub mod perm;
pub mod quantize;
pub mod terrain;

pub use crate::fb::{GrayBuffer, PixelSink};
pub use glam::{DVec2, DVec3, UVec3};
pub use noise::NoiseField;
pub use perm::{ChaChaGenerator, PermutationTable, SeededGenerator};
pub use quantize::{quantize, to_byte};

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::debug;

pub const DEFAULT_FEATURE_SIZE_2D: f64 = 100.0;
pub const DEFAULT_FEATURE_SIZE_3D: f64 = 25.0;

/// A scalar field sampled once per grid cell, nominally in `[-1, 1]`.
pub trait ProcGen: Sync {
    fn sample(&self, pos: &DVec3) -> f64;
}

/// Maps one grid cell to its output byte.
pub fn sample_byte<T>(procgen: &T, x: u32, y: u32, z: u32, levels: Option<u32>) -> u8
where
    T: ProcGen + ?Sized,
{
    let pos = DVec3::new(x as f64, y as f64, z as f64);
    let value = procgen.sample(&pos);
    to_byte((value + 1.0) * 0.5 * 255.0, levels)
}

/// Writes every cell of layer `z` into `sink`, row by row.
pub fn render_layer<T, S>(
    procgen: &T,
    width: u32,
    height: u32,
    z: u32,
    levels: Option<u32>,
    sink: &mut S,
) where
    T: ProcGen + ?Sized,
    S: PixelSink<u8> + ?Sized,
{
    for y in 0..height {
        for x in 0..width {
            let value = sample_byte(procgen, x, y, z, levels);
            sink.put((x as usize, y as usize), value);
        }
    }
}

/// Renders layer `z` into a fresh buffer, rows in parallel.
pub fn generate_layer<T>(
    procgen: &T,
    width: u32,
    height: u32,
    z: u32,
    levels: Option<u32>,
) -> GrayBuffer
where
    T: ProcGen + ?Sized,
{
    let mut fb = GrayBuffer::new(width as usize, height as usize);
    if width == 0 {
        return fb;
    }

    fb.data
        .par_chunks_mut(width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = sample_byte(procgen, x as u32, y as u32, z, levels);
            }
        });

    fb
}

/// Renders every layer of `size`, layers in parallel. `progress` is called
/// with `(finished, total)` as each layer completes, in completion order.
pub fn generate_stack<T, F>(
    procgen: &T,
    size: UVec3,
    levels: Option<u32>,
    progress: F,
) -> Vec<GrayBuffer>
where
    T: ProcGen + ?Sized,
    F: Fn(usize, usize) + Sync,
{
    let timer = Instant::now();
    let total = size.z as usize;
    let finished = AtomicUsize::new(0);

    let layers: Vec<GrayBuffer> = (0..size.z)
        .into_par_iter()
        .map(|z| {
            let fb = generate_layer(procgen, size.x, size.y, z, levels);
            let done = finished.fetch_add(1, Ordering::Relaxed) + 1;
            progress(done, total);
            fb
        })
        .collect();

    debug!("generated {} layers in {:?}", total, timer.elapsed());
    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Ramp;

    impl ProcGen for Ramp {
        fn sample(&self, pos: &DVec3) -> f64 {
            (pos.x + pos.z) / 10.0 - 1.0
        }
    }

    #[test]
    fn sample_byte_maps_range() {
        struct Constant(f64);
        impl ProcGen for Constant {
            fn sample(&self, _pos: &DVec3) -> f64 {
                self.0
            }
        }

        assert_eq!(sample_byte(&Constant(-1.0), 0, 0, 0, None), 0);
        assert_eq!(sample_byte(&Constant(1.0), 0, 0, 0, None), 255);
        assert_eq!(sample_byte(&Constant(0.0), 0, 0, 0, None), 127);
        assert_eq!(sample_byte(&Constant(0.0), 0, 0, 0, Some(4)), 127);
        assert_eq!(sample_byte(&Constant(1.5), 0, 0, 0, None), 255);
        assert_eq!(sample_byte(&Constant(-1.5), 0, 0, 0, Some(4)), 0);
    }

    #[test]
    fn parallel_layer_matches_sink() {
        let gen = terrain::TerrainGen::flat(9, DVec2::splat(8.0));
        let fast = generate_layer(&gen, 33, 17, 0, Some(8));
        let mut slow = GrayBuffer::new(33, 17);
        render_layer(&gen, 33, 17, 0, Some(8), &mut slow);
        assert_eq!(fast, slow);
    }

    #[test]
    fn empty_layer() {
        let fb = generate_layer(&Ramp, 0, 5, 0, None);
        assert!(fb.data.is_empty());
    }

    #[test]
    fn stack_in_layer_order() {
        let calls = Mutex::new(Vec::new());
        let layers = generate_stack(&Ramp, UVec3::new(4, 2, 5), None, |done, total| {
            calls.lock().unwrap().push((done, total));
        });

        assert_eq!(layers.len(), 5);
        for (z, layer) in layers.iter().enumerate() {
            assert_eq!(layer.get((0, 0)), Some(sample_byte(&Ramp, 0, 0, z as u32, None)));
            assert_eq!(layer.get((3, 1)), Some(sample_byte(&Ramp, 3, 1, z as u32, None)));
        }

        let mut calls = calls.into_inner().unwrap();
        calls.sort_unstable();
        let expected: Vec<_> = (1..=5).map(|done| (done, 5)).collect();
        assert_eq!(calls, expected);
    }
}
