// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

use argh::FromArgs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use simplex_heightmap::config::GenConfig;
use simplex_heightmap::error::Result;
use simplex_heightmap::export::{check_targets, export_png};
use simplex_heightmap::procgen::terrain::TerrainGen;
use simplex_heightmap::procgen::{generate_layer, generate_stack};

#[derive(FromArgs)]
/// Seeded simplex-noise heightmap generator
struct Args {
    /// JSON config file; flags given here override its fields
    #[argh(option)]
    config: Option<PathBuf>,

    /// image width in pixels
    #[argh(option)]
    width: Option<u32>,

    /// image height in pixels
    #[argh(option)]
    height: Option<u32>,

    /// number of slices through the 3D field (omit for a single 2D image)
    #[argh(option)]
    depth: Option<u32>,

    /// noise seed
    #[argh(option)]
    seed: Option<u64>,

    /// feature size along x and y (default 100 for 2D, 25 for 3D)
    #[argh(option)]
    feature_size: Option<f64>,

    /// feature size along z (defaults to the x/y feature size)
    #[argh(option)]
    feature_size_z: Option<f64>,

    /// number of quantization levels
    #[argh(option)]
    levels: Option<u32>,

    /// output PNG path; slices are written as <stem>_NNN.png
    #[argh(option, short = 'o')]
    output: Option<PathBuf>,

    /// overwrite existing files
    #[argh(switch)]
    force: bool,
}

impl Args {
    fn into_config(self) -> Result<GenConfig> {
        let mut config = match &self.config {
            Some(path) => GenConfig::load(path)?,
            None => GenConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.depth.is_some() {
            config.depth = self.depth;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.feature_size.is_some() {
            config.feature_size = self.feature_size;
        }
        if self.feature_size_z.is_some() {
            config.feature_size_z = self.feature_size_z;
        }
        if self.levels.is_some() {
            config.levels = self.levels;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        config.force |= self.force;

        Ok(config)
    }
}

fn run(config: &GenConfig) -> Result<()> {
    config.validate()?;

    let paths = config.output_paths();
    check_targets(&paths, config.force)?;

    let size = config.size();
    let feature_size = config.feature_sizes();
    info!(
        "generating {}x{}x{} with seed {} (feature size {:?}, levels {:?})",
        size.x, size.y, size.z, config.seed, feature_size, config.levels
    );

    let timer = Instant::now();
    let gen = TerrainGen::new(config.seed, feature_size);

    if config.is_volumetric() {
        let layers = generate_stack(&gen, size, config.levels, |done, total| {
            info!("slice {}/{}", done, total);
        });
        for (layer, path) in layers.iter().zip(paths.iter()) {
            export_png(layer, path)?;
        }
    } else {
        let layer = generate_layer(&gen, size.x, size.y, 0, config.levels);
        export_png(&layer, &paths[0])?;
    }

    info!("wrote {} file(s) in {:?}", paths.len(), timer.elapsed());
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Args = argh::from_env();
    match args.into_config().and_then(|config| run(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
