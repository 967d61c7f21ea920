// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

//! Open-Simplex-style gradient noise in two and three dimensions.
//!
//! Input space is skewed onto a simplectic lattice, and every lattice point
//! close enough to the sample contributes `attn^4 * dot(gradient, offset)`
//! with `attn = 2 - |offset|^2`. Which lattice points are close enough is a
//! fixed case analysis on the position inside the skewed cell.

use super::perm::{PermutationTable, SeededGenerator};

const STRETCH_2D: f64 = -0.211_324_865_405_187; // (1 / sqrt(3) - 1) / 2
const SQUISH_2D: f64 = 0.366_025_403_784_439; // (sqrt(3) - 1) / 2
const NORM_2D: f64 = 41.0;

const STRETCH_3D: f64 = -1.0 / 6.0;
const SQUISH_3D: f64 = 1.0 / 3.0;
const NORM_3D: f64 = 103.0;

/// Directions to the vertices of an irregular octagon.
#[rustfmt::skip]
const GRADIENTS_2D: [i8; 16] = [
     5,  2,    2,  5,
    -5,  2,   -2,  5,
     5, -2,    2, -5,
    -5, -2,   -2, -5,
];

/// Directions toward the vertices of a rhombicuboctahedron.
#[rustfmt::skip]
const GRADIENTS_3D: [i8; 48] = [
    -11,  4,  4,   -4, 11,  4,   -4,  4, 11,
     11,  4,  4,    4, 11,  4,    4,  4, 11,
    -11, -4,  4,   -4,-11,  4,   -4, -4, 11,
     11, -4,  4,    4,-11,  4,    4, -4, 11,
    -11,  4, -4,   -4, 11, -4,   -4,  4,-11,
     11,  4, -4,
];

type Offset2 = [i32; 2];
type Offset3 = [i32; 3];

const NEAR_CORNER_LOW: Offset2 = [0, 0];
const NEAR_CORNER_HIGH: Offset2 = [1, 1];

const LOWER_TETRAHEDRON: [Offset3; 4] = [[0, 0, 0], [1, 0, 0], [0, 1, 0], [0, 0, 1]];
const UPPER_TETRAHEDRON: [Offset3; 4] = [[1, 1, 0], [1, 0, 1], [0, 1, 1], [1, 1, 1]];
const OCTAHEDRON: [Offset3; 6] = [
    [1, 0, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 1, 0],
    [1, 0, 1],
    [0, 1, 1],
];

const AXIS_X: u8 = 0x01;
const AXIS_Y: u8 = 0x02;
const AXIS_Z: u8 = 0x04;

/// A seeded noise field. Immutable once built, so it can be shared across
/// threads by reference.
#[derive(Clone, Debug)]
pub struct NoiseField {
    table: Box<PermutationTable>,
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        Self::from_table(PermutationTable::new(seed))
    }

    pub fn from_generator<G>(gen: &mut G) -> Self
    where
        G: SeededGenerator + ?Sized,
    {
        Self::from_table(PermutationTable::from_generator(gen))
    }

    pub fn from_table(table: PermutationTable) -> Self {
        Self {
            table: Box::new(table),
        }
    }

    pub fn table(&self) -> &PermutationTable {
        &self.table
    }

    /// Samples the 2D field. Feature sizes must be positive; validating
    /// them is up to the caller.
    pub fn noise_2d(&self, x: f64, y: f64, feature_x: f64, feature_y: f64) -> f64 {
        self.eval_2d(x / feature_x, y / feature_y)
    }

    /// Samples the 3D field. Feature sizes must be positive.
    pub fn noise_3d(
        &self,
        x: f64,
        y: f64,
        z: f64,
        feature_x: f64,
        feature_y: f64,
        feature_z: f64,
    ) -> f64 {
        self.eval_3d(x / feature_x, y / feature_y, z / feature_z)
    }

    /// Evaluates the 2D field at already-normalized coordinates.
    pub fn eval_2d(&self, x: f64, y: f64) -> f64 {
        let stretch = (x + y) * STRETCH_2D;
        let xs = x + stretch;
        let ys = y + stretch;

        let xsb = xs.floor() as i32;
        let ysb = ys.floor() as i32;

        let xins = xs - xsb as f64;
        let yins = ys - ysb as f64;
        let in_sum = xins + yins;

        // position relative to the cell origin, back in input space
        let squish = in_sum * SQUISH_2D;
        let d0 = [xins + squish, yins + squish];

        let (near, extra) = if in_sum <= 1.0 {
            let zins = 1.0 - in_sum;
            let extra = if zins > xins || zins > yins {
                if xins > yins {
                    [1, -1]
                } else {
                    [-1, 1]
                }
            } else {
                [1, 1]
            };
            (NEAR_CORNER_LOW, extra)
        } else {
            let zins = 2.0 - in_sum;
            let extra = if zins < xins || zins < yins {
                if xins > yins {
                    [2, 0]
                } else {
                    [0, 2]
                }
            } else {
                [0, 0]
            };
            (NEAR_CORNER_HIGH, extra)
        };

        let origin = [xsb, ysb];
        let value = self.contribution_2d(origin, [1, 0], d0)
            + self.contribution_2d(origin, [0, 1], d0)
            + self.contribution_2d(origin, near, d0)
            + self.contribution_2d(origin, extra, d0);

        value / NORM_2D
    }

    /// Evaluates the 3D field at already-normalized coordinates.
    pub fn eval_3d(&self, x: f64, y: f64, z: f64) -> f64 {
        let stretch = (x + y + z) * STRETCH_3D;
        let xs = x + stretch;
        let ys = y + stretch;
        let zs = z + stretch;

        let xsb = xs.floor() as i32;
        let ysb = ys.floor() as i32;
        let zsb = zs.floor() as i32;

        let ins = [xs - xsb as f64, ys - ysb as f64, zs - zsb as f64];
        let in_sum = ins[0] + ins[1] + ins[2];

        let squish = in_sum * SQUISH_3D;
        let d0 = [ins[0] + squish, ins[1] + squish, ins[2] + squish];
        let origin = [xsb, ysb, zsb];

        let (corners, extras): (&[Offset3], [Offset3; 2]) = if in_sum <= 1.0 {
            (&LOWER_TETRAHEDRON[..], lower_extras(ins, in_sum))
        } else if in_sum >= 2.0 {
            (&UPPER_TETRAHEDRON[..], upper_extras(ins, in_sum))
        } else {
            (&OCTAHEDRON[..], octahedron_extras(ins))
        };

        let mut value = 0.0;
        for offset in corners.iter().chain(extras.iter()) {
            value += self.contribution_3d(origin, *offset, d0);
        }

        value / NORM_3D
    }

    #[inline]
    fn contribution_2d(&self, origin: [i32; 2], offset: Offset2, d0: [f64; 2]) -> f64 {
        let squish = (offset[0] + offset[1]) as f64 * SQUISH_2D;
        let dx = d0[0] - offset[0] as f64 - squish;
        let dy = d0[1] - offset[1] as f64 - squish;

        let attn = 2.0 - dx * dx - dy * dy;
        if attn <= 0.0 {
            return 0.0;
        }

        let hash = self.table.hash2(
            origin[0].wrapping_add(offset[0]),
            origin[1].wrapping_add(offset[1]),
        );
        let index = (hash & 0x0e) as usize;
        let grad = GRADIENTS_2D[index] as f64 * dx + GRADIENTS_2D[index + 1] as f64 * dy;

        let attn = attn * attn;
        attn * attn * grad
    }

    #[inline]
    fn contribution_3d(&self, origin: [i32; 3], offset: Offset3, d0: [f64; 3]) -> f64 {
        let squish = (offset[0] + offset[1] + offset[2]) as f64 * SQUISH_3D;
        let dx = d0[0] - offset[0] as f64 - squish;
        let dy = d0[1] - offset[1] as f64 - squish;
        let dz = d0[2] - offset[2] as f64 - squish;

        let attn = 2.0 - dx * dx - dy * dy - dz * dz;
        if attn <= 0.0 {
            return 0.0;
        }

        let index = self.table.hash3(
            origin[0].wrapping_add(offset[0]),
            origin[1].wrapping_add(offset[1]),
            origin[2].wrapping_add(offset[2]),
        );
        let grad = GRADIENTS_3D[index] as f64 * dx
            + GRADIENTS_3D[index + 1] as f64 * dy
            + GRADIENTS_3D[index + 2] as f64 * dz;

        let attn = attn * attn;
        attn * attn * grad
    }
}

#[inline]
fn has(mask: u8, axis: u8) -> bool {
    mask & axis != 0
}

/// Extra lattice points for the tetrahedron at (0,0,0).
fn lower_extras(ins: [f64; 3], in_sum: f64) -> [Offset3; 2] {
    let [xins, yins, zins] = ins;

    // closest two of (1,0,0), (0,1,0), (0,0,1)
    let (mut a_point, mut a_score) = (AXIS_X, xins);
    let (mut b_point, mut b_score) = (AXIS_Y, yins);
    if a_score >= b_score && zins > b_score {
        b_score = zins;
        b_point = AXIS_Z;
    } else if a_score < b_score && zins > a_score {
        a_score = zins;
        a_point = AXIS_Z;
    }

    let wins = 1.0 - in_sum;
    if wins > a_score || wins > b_score {
        // (0,0,0) is one of the two closest vertices
        let c = if b_score > a_score { b_point } else { a_point };
        let x = if has(c, AXIS_X) { [1, 1] } else { [-1, 0] };
        let y = match (has(c, AXIS_Y), has(c, AXIS_X)) {
            (true, _) => [1, 1],
            (false, false) => [0, -1],
            (false, true) => [-1, 0],
        };
        let z = if has(c, AXIS_Z) { [1, 1] } else { [0, -1] };
        [[x[0], y[0], z[0]], [x[1], y[1], z[1]]]
    } else {
        let c = a_point | b_point;
        let axis = |bit| if has(c, bit) { [1, 1] } else { [0, -1] };
        let (x, y, z) = (axis(AXIS_X), axis(AXIS_Y), axis(AXIS_Z));
        [[x[0], y[0], z[0]], [x[1], y[1], z[1]]]
    }
}

/// Extra lattice points for the tetrahedron at (1,1,1).
fn upper_extras(ins: [f64; 3], in_sum: f64) -> [Offset3; 2] {
    let [xins, yins, zins] = ins;

    // closest two of (1,1,0), (1,0,1), (0,1,1)
    let (mut a_point, mut a_score) = (AXIS_Y | AXIS_Z, xins);
    let (mut b_point, mut b_score) = (AXIS_X | AXIS_Z, yins);
    if a_score <= b_score && zins < b_score {
        b_score = zins;
        b_point = AXIS_X | AXIS_Y;
    } else if a_score > b_score && zins < a_score {
        a_score = zins;
        a_point = AXIS_X | AXIS_Y;
    }

    let wins = 3.0 - in_sum;
    if wins < a_score || wins < b_score {
        // (1,1,1) is one of the two closest vertices
        let c = if b_score < a_score { b_point } else { a_point };
        let x = if has(c, AXIS_X) { [2, 1] } else { [0, 0] };
        let y = match (has(c, AXIS_Y), has(c, AXIS_X)) {
            (false, _) => [0, 0],
            (true, true) => [1, 2],
            (true, false) => [2, 1],
        };
        let z = if has(c, AXIS_Z) { [1, 2] } else { [0, 0] };
        [[x[0], y[0], z[0]], [x[1], y[1], z[1]]]
    } else {
        let c = a_point & b_point;
        let axis = |bit| if has(c, bit) { [1, 2] } else { [0, 0] };
        let (x, y, z) = (axis(AXIS_X), axis(AXIS_Y), axis(AXIS_Z));
        [[x[0], y[0], z[0]], [x[1], y[1], z[1]]]
    }
}

/// Extra lattice points for the octahedron between the two tetrahedra.
fn octahedron_extras(ins: [f64; 3]) -> [Offset3; 2] {
    let [xins, yins, zins] = ins;

    // (0,0,1) against (1,1,0)
    let p1 = xins + yins;
    let (a_score, mut a_point, mut a_far) = if p1 > 1.0 {
        (p1 - 1.0, AXIS_X | AXIS_Y, true)
    } else {
        (1.0 - p1, AXIS_Z, false)
    };

    // (0,1,0) against (1,0,1)
    let p2 = xins + zins;
    let (b_score, mut b_point, mut b_far) = if p2 > 1.0 {
        (p2 - 1.0, AXIS_X | AXIS_Z, true)
    } else {
        (1.0 - p2, AXIS_Y, false)
    };

    // the closer of (1,0,0) and (0,1,1) replaces the further of a and b
    let p3 = yins + zins;
    let (score, point, far) = if p3 > 1.0 {
        (p3 - 1.0, AXIS_Y | AXIS_Z, true)
    } else {
        (1.0 - p3, AXIS_X, false)
    };
    if a_score <= b_score && a_score < score {
        a_point = point;
        a_far = far;
    } else if a_score > b_score && b_score < score {
        b_point = point;
        b_far = far;
    }

    match (a_far, b_far) {
        (true, true) => {
            // (1,1,1) plus a step of two along the shared axis
            let c = a_point & b_point;
            [[1, 1, 1], double_step(c)]
        }
        (false, false) => {
            // (0,0,0) plus a permutation of (-1,1,1) on the omitted axis
            let c = a_point | b_point;
            [[0, 0, 0], back_step(!c)]
        }
        _ => {
            let (c1, c2) = if a_far {
                (a_point, b_point)
            } else {
                (b_point, a_point)
            };
            [back_step(!c1), double_step(c2)]
        }
    }
}

/// Permutation of (-1,1,1) with the -1 on the first axis set in `mask`.
fn back_step(mask: u8) -> Offset3 {
    if has(mask, AXIS_X) {
        [-1, 1, 1]
    } else if has(mask, AXIS_Y) {
        [1, -1, 1]
    } else {
        [1, 1, -1]
    }
}

/// Permutation of (2,0,0) with the 2 on the first axis set in `mask`.
fn double_step(mask: u8) -> Offset3 {
    if has(mask, AXIS_X) {
        [2, 0, 0]
    } else if has(mask, AXIS_Y) {
        [0, 2, 0]
    } else {
        [0, 0, 2]
    }
}
