// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

pub mod config;
pub mod error;
pub mod export;
pub mod fb;
pub mod procgen;

pub use procgen::{quantize, NoiseField, PermutationTable};
