// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

use super::*;

/// Heightmap generator backed by a seeded [`NoiseField`].
///
/// With a flat feature size (`z == 0.0`) every layer samples the 2D field,
/// otherwise layers are slices through the 3D field.
pub struct TerrainGen {
    field: NoiseField,
    feature_size: DVec3,
}

impl TerrainGen {
    pub fn new(seed: u64, feature_size: DVec3) -> Self {
        Self::with_field(NoiseField::new(seed), feature_size)
    }

    pub fn flat(seed: u64, feature_size: DVec2) -> Self {
        Self::new(seed, feature_size.extend(0.0))
    }

    pub fn with_field(field: NoiseField, feature_size: DVec3) -> Self {
        Self {
            field,
            feature_size,
        }
    }

    pub fn field(&self) -> &NoiseField {
        &self.field
    }

    pub fn is_volumetric(&self) -> bool {
        self.feature_size.z > 0.0
    }
}

impl Default for TerrainGen {
    fn default() -> Self {
        Self::flat(0, DVec2::splat(DEFAULT_FEATURE_SIZE_2D))
    }
}

impl ProcGen for TerrainGen {
    fn sample(&self, pos: &DVec3) -> f64 {
        let fs = self.feature_size;
        if self.is_volumetric() {
            self.field.noise_3d(pos.x, pos.y, pos.z, fs.x, fs.y, fs.z)
        } else {
            self.field.noise_2d(pos.x, pos.y, fs.x, fs.y)
        }
    }
}
