// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const TABLE_SIZE: usize = 256;

/// Number of rows in the 3D gradient table.
pub const GRADIENT_COUNT_3D: usize = 16;

/// A deterministic source of unsigned integers.
///
/// Every value is a pure function of the seed and the calls made so far, so
/// anything built from it is reproducible.
pub trait SeededGenerator {
    fn next_u64(&mut self) -> u64;

    /// Uniform value in `[0, bound)`. `bound` must be non-zero.
    fn next_below(&mut self, bound: u64) -> u64;
}

pub struct ChaChaGenerator {
    rng: ChaCha8Rng,
}

impl ChaChaGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl SeededGenerator for ChaChaGenerator {
    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn next_below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0, "empty range");
        self.rng.gen_range(0, bound)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationTable {
    perm: [u8; TABLE_SIZE],
    grad_index_3d: [u8; TABLE_SIZE],
}

impl PermutationTable {
    pub fn new(seed: u64) -> Self {
        Self::from_generator(&mut ChaChaGenerator::new(seed))
    }

    /// Fisher-Yates shuffle of the identity, walking from the top index down.
    pub fn from_generator<G>(gen: &mut G) -> Self
    where
        G: SeededGenerator + ?Sized,
    {
        let mut perm = [0u8; TABLE_SIZE];
        for (i, p) in perm.iter_mut().enumerate() {
            *p = i as u8;
        }

        for i in (1..TABLE_SIZE).rev() {
            let j = gen.next_below(i as u64 + 1) as usize;
            perm.swap(i, j);
        }

        let mut grad_index_3d = [0u8; TABLE_SIZE];
        for (index, p) in grad_index_3d.iter_mut().zip(perm.iter()) {
            *index = (*p as usize % GRADIENT_COUNT_3D * 3) as u8;
        }

        Self {
            perm,
            grad_index_3d,
        }
    }

    pub fn perm(&self) -> &[u8; TABLE_SIZE] {
        &self.perm
    }

    pub fn grad_index_3d(&self) -> &[u8; TABLE_SIZE] {
        &self.grad_index_3d
    }

    /// Hashes a 2D lattice point to a permutation entry.
    #[inline]
    pub fn hash2(&self, x: i32, y: i32) -> u8 {
        let a = self.perm[(x & 0xff) as usize] as i32;
        self.perm[(a.wrapping_add(y) & 0xff) as usize]
    }

    /// Hashes a 3D lattice point to a row offset into the 3D gradient table.
    #[inline]
    pub fn hash3(&self, x: i32, y: i32, z: i32) -> usize {
        let a = self.hash2(x, y) as i32;
        self.grad_index_3d[(a.wrapping_add(z) & 0xff) as usize] as usize
    }
}
