// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

/// Snaps `value` down onto a grid of `levels` equal steps spanning
/// `[min, max]`. Zero levels yields 0.
///
/// The result is not clamped, so inputs outside `[min, max]` map outside it
/// too. Clamping to a pixel range is left to the caller.
pub fn quantize(value: f64, min: f64, max: f64, levels: u32) -> f64 {
    if levels == 0 {
        return 0.0;
    }

    let step = (max - min) / levels as f64;
    (value / step).floor() * step
}

/// Quantizes (when `levels` is set) and clamps into a byte.
pub fn to_byte(value: f64, levels: Option<u32>) -> u8 {
    let value = match levels {
        Some(levels) => quantize(value, 0.0, 255.0, levels),
        None => value,
    };

    value.max(0.0).min(255.0) as u8
}
