//! In-memory pixel buffer.

use crate::colors::OFF;
use crate::driver::{FromPin, PixelBuffer};
use crate::types::PixelColor;

/// A software strip of up to `N` pixels.
///
/// Keeps two frames: the working buffer that effects draw into, and the
/// frame that was last flushed with [`PixelBuffer::write`]. Useful as a
/// stand-in for real hardware in simulations and tests, or as the staging
/// buffer of a custom driver that copies [`FrameBuffer::shown`] out.
#[derive(Debug, Clone)]
pub struct FrameBuffer<const N: usize> {
    pixels: [PixelColor; N],
    shown: [PixelColor; N],
    len: usize,
    writes: u32,
}

impl<const N: usize> FrameBuffer<N> {
    /// Creates a dark buffer of `len` pixels (capped at `N`).
    pub fn new(len: usize) -> Self {
        Self {
            pixels: [OFF; N],
            shown: [OFF; N],
            len: len.min(N),
            writes: 0,
        }
    }

    /// The working buffer.
    pub fn pixels(&self) -> &[PixelColor] {
        &self.pixels[..self.len]
    }

    /// The frame most recently flushed by `write`.
    pub fn shown(&self) -> &[PixelColor] {
        &self.shown[..self.len]
    }

    /// Number of times `write` has been called.
    pub fn write_count(&self) -> u32 {
        self.writes
    }
}

impl<const N: usize> Default for FrameBuffer<N> {
    fn default() -> Self {
        Self::new(N)
    }
}

impl<const N: usize> FromPin for FrameBuffer<N> {
    fn from_pin(_pin: u8, count: usize) -> Self {
        Self::new(count)
    }
}

impl<const N: usize> PixelBuffer for FrameBuffer<N> {
    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> PixelColor {
        self.pixels()[index]
    }

    fn set(&mut self, index: usize, color: PixelColor) {
        self.pixels[..self.len][index] = color;
    }

    fn fill(&mut self, color: PixelColor) {
        self.pixels[..self.len].fill(color);
    }

    fn write(&mut self) {
        self.shown[..self.len].copy_from_slice(&self.pixels[..self.len]);
        self.writes = self.writes.wrapping_add(1);
    }
}
