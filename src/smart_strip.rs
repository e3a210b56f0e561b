//! [`PixelBuffer`] for any `smart-leds` driver.

use crate::colors::OFF;
use crate::driver::PixelBuffer;
use crate::types::PixelColor;
use smart_leds::{RGB8, SmartLedsWrite};

/// Pixel buffer in front of a [`SmartLedsWrite`] driver of up to `N` pixels.
///
/// Drawing only touches the buffer; `write` hands the whole frame to the
/// driver. Driver errors are counted and dropped so that playback never
/// stops on a glitched transfer.
pub struct SmartLedsBuffer<W, const N: usize> {
    writer: W,
    pixels: [PixelColor; N],
    len: usize,
    failed_writes: u32,
}

impl<W, const N: usize> SmartLedsBuffer<W, N>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    /// Wraps `writer` driving `len` pixels (capped at `N`).
    pub fn new(writer: W, len: usize) -> Self {
        Self {
            writer,
            pixels: [OFF; N],
            len: len.min(N),
            failed_writes: 0,
        }
    }

    /// Number of flushes the driver rejected.
    pub fn failed_writes(&self) -> u32 {
        self.failed_writes
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<W, const N: usize> PixelBuffer for SmartLedsBuffer<W, N>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> PixelColor {
        self.pixels[..self.len][index]
    }

    fn set(&mut self, index: usize, color: PixelColor) {
        self.pixels[..self.len][index] = color;
    }

    fn write(&mut self) {
        let frame = self.pixels[..self.len]
            .iter()
            .map(|pixel| RGB8::new(pixel.red, pixel.green, pixel.blue));

        if self.writer.write(frame).is_err() {
            self.failed_writes = self.failed_writes.wrapping_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("strip write failed ({} so far)", self.failed_writes);
        }
    }
}
