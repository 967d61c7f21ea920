// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("feature size must be positive, got {axis} = {value}")]
    InvalidFeatureSize { axis: char, value: f64 },

    #[error("grid dimensions must be non-zero, got {width}x{height}x{depth}")]
    EmptyGrid { width: u32, height: u32, depth: u32 },

    #[error("output path has no file name: {0}")]
    InvalidOutput(PathBuf),

    #[error("{0} already exists (pass --force to overwrite)")]
    OutputExists(PathBuf),

    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
