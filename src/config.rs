// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

use crate::error::{Error, Result};
use crate::procgen::{DEFAULT_FEATURE_SIZE_2D, DEFAULT_FEATURE_SIZE_3D};
use glam::{DVec3, UVec3};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything needed for one generation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenConfig {
    pub width: u32,
    pub height: u32,
    /// Number of slices through the 3D field. `None` renders one 2D image.
    pub depth: Option<u32>,
    pub seed: u64,
    /// Per-axis feature size. Unset axes fall back to the 2D or 3D default.
    pub feature_size: Option<f64>,
    pub feature_size_z: Option<f64>,
    pub levels: Option<u32>,
    pub output: PathBuf,
    pub force: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            depth: None,
            seed: 0,
            feature_size: None,
            feature_size_z: None,
            levels: None,
            output: PathBuf::from("heightmap.png"),
            force: false,
        }
    }
}

impl GenConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| Error::ConfigParse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn is_volumetric(&self) -> bool {
        self.depth.is_some()
    }

    /// Feature size per axis; `z` is zero for 2D runs.
    pub fn feature_sizes(&self) -> DVec3 {
        if self.is_volumetric() {
            let xy = self.feature_size.unwrap_or(DEFAULT_FEATURE_SIZE_3D);
            let z = self.feature_size_z.unwrap_or(xy);
            DVec3::new(xy, xy, z)
        } else {
            let xy = self.feature_size.unwrap_or(DEFAULT_FEATURE_SIZE_2D);
            DVec3::new(xy, xy, 0.0)
        }
    }

    pub fn size(&self) -> UVec3 {
        UVec3::new(self.width, self.height, self.depth.unwrap_or(1))
    }

    /// Rejects settings the noise engine leaves undefined.
    pub fn validate(&self) -> Result<()> {
        let size = self.size();
        if size.x == 0 || size.y == 0 || size.z == 0 {
            return Err(Error::EmptyGrid {
                width: size.x,
                height: size.y,
                depth: size.z,
            });
        }

        let fs = self.feature_sizes();
        let mut axes = vec![('x', fs.x), ('y', fs.y)];
        if self.is_volumetric() {
            axes.push(('z', fs.z));
        }
        for (axis, value) in axes {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidFeatureSize { axis, value });
            }
        }

        if self.output.file_stem().is_none() {
            return Err(Error::InvalidOutput(self.output.clone()));
        }

        Ok(())
    }

    /// Files this run writes, one per layer.
    pub fn output_paths(&self) -> Vec<PathBuf> {
        match self.depth {
            None => vec![self.output.clone()],
            Some(depth) => (0..depth).map(|z| slice_path(&self.output, z)).collect(),
        }
    }
}

/// `out/stack.png` becomes `out/stack_007.png` for slice 7.
pub fn slice_path(base: &Path, z: u32) -> PathBuf {
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = base
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "png".to_owned());
    base.with_file_name(format!("{}_{:03}.{}", stem, z, ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GenConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.feature_sizes(), DVec3::new(100.0, 100.0, 0.0));
        assert_eq!(config.size(), UVec3::new(512, 512, 1));
        assert_eq!(config.output_paths(), vec![PathBuf::from("heightmap.png")]);
    }

    #[test]
    fn volumetric_defaults() {
        let config = GenConfig {
            depth: Some(3),
            ..Default::default()
        };
        assert_eq!(config.feature_sizes(), DVec3::splat(25.0));

        let config = GenConfig {
            depth: Some(3),
            feature_size: Some(40.0),
            feature_size_z: Some(10.0),
            ..Default::default()
        };
        assert_eq!(config.feature_sizes(), DVec3::new(40.0, 40.0, 10.0));
    }

    #[test]
    fn rejects_bad_feature_sizes() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY].iter() {
            let config = GenConfig {
                feature_size: Some(*bad),
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(Error::InvalidFeatureSize { axis: 'x', .. })
            ));
        }

        let config = GenConfig {
            depth: Some(2),
            feature_size_z: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidFeatureSize { axis: 'z', .. })
        ));

        // z is unused for flat images
        let config = GenConfig {
            feature_size_z: Some(-5.0),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_grid() {
        let config = GenConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::EmptyGrid { .. })));

        let config = GenConfig {
            depth: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::EmptyGrid { .. })));
    }

    #[test]
    fn slice_paths() {
        let config = GenConfig {
            depth: Some(2),
            output: PathBuf::from("out/stack.png"),
            ..Default::default()
        };
        assert_eq!(
            config.output_paths(),
            vec![
                PathBuf::from("out/stack_000.png"),
                PathBuf::from("out/stack_001.png")
            ]
        );
        assert_eq!(
            slice_path(Path::new("noext"), 12),
            PathBuf::from("noext_012.png")
        );
    }

    #[test]
    fn json_partial() {
        let config = GenConfig::from_json(r#"{ "seed": 7, "depth": 4, "levels": 8 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.depth, Some(4));
        assert_eq!(config.levels, Some(8));
        assert_eq!(config.width, 512);

        assert!(GenConfig::from_json(r#"{ "sead": 7 }"#).is_err());
    }
}
