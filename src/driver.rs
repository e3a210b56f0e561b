//! Pixel driver abstraction.
//!
//! Three layers cooperate here:
//!
//! - [`PixelBuffer`] is implemented by the concrete strip buffer (hardware or
//!   software). Its methods are the default behavior of every operation.
//! - [`DriverHooks`] decorates a buffer. Each hook receives the buffer and may
//!   call its default method, wrap it, or replace it entirely.
//! - [`DriverAdapter`] composes the two and exposes the uniform [`Strip`]
//!   surface that effects draw on.

use crate::types::PixelColor;

/// Trait for abstracting an addressable LED strip buffer.
///
/// `get`, `set` and `fill` only touch the in-memory buffer. `write` pushes the
/// buffer to the LEDs and is the only operation with a physical effect.
/// Handle any hardware errors internally - `write` cannot fail.
pub trait PixelBuffer {
    /// Number of pixels in the strip.
    fn len(&self) -> usize;

    /// Returns true if the strip has no pixels.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads a pixel from the buffer.
    ///
    /// # Panics
    /// Implementations may panic if `index >= len()`.
    fn get(&self, index: usize) -> PixelColor;

    /// Writes a pixel into the buffer.
    ///
    /// # Panics
    /// Implementations may panic if `index >= len()`.
    fn set(&mut self, index: usize, color: PixelColor);

    /// Sets every pixel in the buffer to `color`.
    fn fill(&mut self, color: PixelColor) {
        for index in 0..self.len() {
            self.set(index, color);
        }
    }

    /// Flushes the buffer to the LEDs.
    fn write(&mut self);
}

/// Buffers that can be built from a data pin and a pixel count.
pub trait FromPin: Sized {
    fn from_pin(pin: u8, count: usize) -> Self;
}

/// Per-operation overrides for a [`PixelBuffer`].
///
/// Every method defaults to the buffer's own implementation. Override only
/// the operations you need; an override can still reach the default through
/// the buffer it is handed (for example `PixelBuffer::fill(buffer, color)`).
pub trait DriverHooks<B: PixelBuffer> {
    /// Builds the buffer. `default` is the buffer's own constructor.
    fn create(&mut self, pin: u8, count: usize, default: fn(u8, usize) -> B) -> B {
        default(pin, count)
    }

    fn len(&self, buffer: &B) -> usize {
        buffer.len()
    }

    fn get(&self, buffer: &B, index: usize) -> PixelColor {
        buffer.get(index)
    }

    fn set(&mut self, buffer: &mut B, index: usize, color: PixelColor) {
        buffer.set(index, color);
    }

    fn fill(&mut self, buffer: &mut B, color: PixelColor) {
        buffer.fill(color);
    }

    fn write(&mut self, buffer: &mut B) {
        buffer.write();
    }
}

/// Hook set that overrides nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoHooks;

impl<B: PixelBuffer> DriverHooks<B> for NoHooks {}

/// The pixel surface effects draw on.
///
/// Object safe, so effects receive it as `&mut dyn Strip` regardless of the
/// buffer and hook types behind it.
pub trait Strip {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> PixelColor;

    fn set(&mut self, index: usize, color: PixelColor);

    fn fill(&mut self, color: PixelColor);

    fn write(&mut self);

    /// Wraps any index into `[0, len)`.
    ///
    /// `remap(-1)` is the last pixel and `remap(len)` is the first, which is
    /// what rotating effects need. An empty strip maps everything to 0.
    fn remap(&self, index: isize) -> usize {
        let len = self.len();
        if len == 0 {
            return 0;
        }
        index.rem_euclid(len as isize) as usize
    }
}

/// Composes a [`PixelBuffer`] with a set of [`DriverHooks`].
#[derive(Debug)]
pub struct DriverAdapter<B: PixelBuffer, H: DriverHooks<B> = NoHooks> {
    buffer: B,
    hooks: H,
}

impl<B: PixelBuffer, H: DriverHooks<B>> DriverAdapter<B, H> {
    /// Wraps an already constructed buffer.
    pub fn new(buffer: B, hooks: H) -> Self {
        Self { buffer, hooks }
    }

    /// Builds the buffer for `count` pixels on `pin`, letting the `create`
    /// hook replace construction.
    pub fn create(pin: u8, count: usize, mut hooks: H) -> Self
    where
        B: FromPin,
    {
        let buffer = hooks.create(pin, count, B::from_pin);
        Self { buffer, hooks }
    }

    /// Returns the underlying buffer.
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Returns the underlying buffer mutably, bypassing the hooks.
    pub fn buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Splits the adapter back into its buffer and hooks.
    pub fn into_parts(self) -> (B, H) {
        (self.buffer, self.hooks)
    }
}

impl<B: PixelBuffer> From<B> for DriverAdapter<B, NoHooks> {
    fn from(buffer: B) -> Self {
        Self::new(buffer, NoHooks)
    }
}

impl<B: PixelBuffer, H: DriverHooks<B>> Strip for DriverAdapter<B, H> {
    fn len(&self) -> usize {
        self.hooks.len(&self.buffer)
    }

    fn get(&self, index: usize) -> PixelColor {
        self.hooks.get(&self.buffer, index)
    }

    fn set(&mut self, index: usize, color: PixelColor) {
        self.hooks.set(&mut self.buffer, index, color);
    }

    fn fill(&mut self, color: PixelColor) {
        self.hooks.fill(&mut self.buffer, color);
    }

    fn write(&mut self) {
        self.hooks.write(&mut self.buffer);
    }
}
