//! Shared test infrastructure for led-animation-seq integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use led_animation_seq::{
    Animation, AnimationState, Attributes, DriverAdapter, FrameBuffer, PixelColor, SequenceHooks,
    Srgb, Strip, TickInstant, TimeSource,
};

// ============================================================================
// Colors
// ============================================================================

pub const RED: PixelColor = Srgb::new(255, 0, 0);
pub const GREEN: PixelColor = Srgb::new(0, 255, 0);
pub const BLUE: PixelColor = Srgb::new(0, 0, 255);

pub type TestStrip = DriverAdapter<FrameBuffer<32>>;

pub fn test_strip(len: usize) -> TestStrip {
    DriverAdapter::from(FrameBuffer::new(len))
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock 32-bit millisecond clock with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TickInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(millis: u32) -> Self {
        Self {
            current_time: Cell::new(TickInstant(millis)),
        }
    }

    /// Advance time by `millis`, wrapping like a hardware counter
    pub fn advance(&self, millis: u32) {
        let current = self.current_time.get();
        self.current_time.set(TickInstant(current.0.wrapping_add(millis)));
    }

    pub fn set_time(&self, millis: u32) {
        self.current_time.set(TickInstant(millis));
    }
}

impl TimeSource<TickInstant> for MockTimeSource {
    fn now(&self) -> TickInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Test Effects
// ============================================================================

/// Counts frames in its payload and paints pixel 0 with the count
pub struct FrameCounter;

pub const FRAMES: &str = "frames";

impl Animation for FrameCounter {
    fn setup(&self, strip: &mut dyn Strip, _attributes: &Attributes) -> AnimationState {
        strip.fill(GREEN);
        AnimationState::with_payload(Attributes::new().with(FRAMES, 0))
    }

    fn next_step(&self, strip: &mut dyn Strip, mut state: AnimationState) -> AnimationState {
        let frames = state.payload.int_or(FRAMES, 0) + 1;
        let _ = state.payload.insert(FRAMES, frames);
        strip.set(0, Srgb::new(frames as u8, 0, 0));
        strip.write();
        state
    }
}

/// Slows itself down by 10 ms on every frame
pub struct SlowingDown;

impl Animation for SlowingDown {
    fn setup(&self, _strip: &mut dyn Strip, _attributes: &Attributes) -> AnimationState {
        AnimationState::new().delay(10)
    }

    fn next_step(&self, _strip: &mut dyn Strip, state: AnimationState) -> AnimationState {
        let delay = state.delay.unwrap_or(0) + 10;
        AnimationState::new().delay(delay)
    }
}

// ============================================================================
// Sequence Hooks
// ============================================================================

/// Sequence hooks that record every call and return scripted answers
#[derive(Default)]
pub struct ScriptedHooks {
    pub advance_calls: heapless::Vec<usize, 32>,
    pub end_calls: u32,
    pub advance_answer: Option<isize>,
    pub end_answer: Option<isize>,
}

impl SequenceHooks for ScriptedHooks {
    fn on_advance(&mut self, candidate: usize) -> Option<isize> {
        let _ = self.advance_calls.push(candidate);
        self.advance_answer
    }

    fn on_sequence_end(&mut self) -> Option<isize> {
        self.end_calls += 1;
        self.end_answer
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two colors allowing each channel to be off by one
pub fn colors_close(a: PixelColor, b: PixelColor) -> bool {
    a.red.abs_diff(b.red) <= 1 && a.green.abs_diff(b.green) <= 1 && a.blue.abs_diff(b.blue) <= 1
}

/// Indices of all lit pixels in `pixels`
pub fn lit_pixels(pixels: &[PixelColor]) -> heapless::Vec<usize, 32> {
    pixels
        .iter()
        .enumerate()
        .filter(|(_, pixel)| **pixel != led_animation_seq::colors::OFF)
        .map(|(index, _)| index)
        .collect()
}
