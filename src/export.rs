// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

//! Grayscale PNG output.

use crate::error::{Error, Result};
use crate::fb::GrayBuffer;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, ImageEncoder};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Fails with [`Error::OutputExists`] on the first target that already
/// exists, unless `force` is set.
pub fn check_targets(paths: &[PathBuf], force: bool) -> Result<()> {
    if force {
        return Ok(());
    }

    match paths.iter().find(|path| path.exists()) {
        Some(path) => Err(Error::OutputExists(path.clone())),
        None => Ok(()),
    }
}

/// Writes `fb` as an 8-bit grayscale PNG.
pub fn export_png(fb: &GrayBuffer, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let writer = BufWriter::new(File::create(path)?);
    let encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Default, FilterType::Adaptive);
    encoder.write_image(&fb.data, fb.width as u32, fb.height as u32, ColorType::L8)?;

    Ok(())
}
