// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

type Point = (usize, usize);
pub type GrayBuffer = Framebuffer<u8>;

/// Accepts one value per grid cell.
pub trait PixelSink<P> {
    fn put(&mut self, xy: Point, p: P);
}

#[derive(Clone, Debug, PartialEq)]
pub struct Framebuffer<P>
where
    P: Copy,
{
    pub width: usize,
    pub height: usize,
    pub data: Vec<P>,
}

impl<P> PixelSink<P> for Framebuffer<P>
where
    P: Copy,
{
    fn put(&mut self, xy: Point, p: P) {
        if let Some(offset) = self.calc_offset(xy) {
            self.data[offset] = p;
        }
    }
}

impl<P> Framebuffer<P>
where
    P: Copy + Default,
{
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![P::default(); width * height],
        }
    }

    pub fn clear(&mut self) {
        self.data.fill(P::default());
    }
}

impl<P> Framebuffer<P>
where
    P: Copy,
{
    fn calc_offset(&self, xy: Point) -> Option<usize> {
        if xy.0 < self.width && xy.1 < self.height {
            Some(xy.1 * self.width + xy.0)
        } else {
            None
        }
    }

    pub fn get(&self, xy: Point) -> Option<P> {
        self.calc_offset(xy).map(|offset| self.data[offset])
    }
}
