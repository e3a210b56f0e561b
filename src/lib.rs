#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`Strip`**: The pixel surface effects draw on, built by `DriverAdapter`
//! - **`PixelBuffer`**: Trait to implement for your LED hardware
//! - **`DriverHooks`**: Per-operation overrides layered over a `PixelBuffer`
//! - **`Animation`**: An effect with a `setup` and a `next_step`
//! - **`AnimationRegistry`**: Name to effect catalog
//! - **`AnimationRuntime`**: One running effect with its frame timer
//! - **`Playlist`**: Ordered steps of effect name, duration and attributes
//! - **`AnimationSequencer`**: Plays a playlist and switches steps on time
//! - **`SequenceHooks`**: Host callbacks that can redirect playback
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Colors are `Srgb<u8>`. Every decision about whether a deadline has passed
//! goes through `TimeInstant::ticks_diff`, so 32-bit millisecond counters can
//! roll over mid-show.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod animation;
pub mod colors;
pub mod command;
pub mod driver;
pub mod effects;
pub mod frame_buffer;
pub mod playlist;
pub mod registry;
pub mod sequencer;
#[cfg(feature = "smart-leds")]
pub mod smart_strip;
pub mod time;
pub mod types;

pub use animation::{AnimationRuntime, DEFAULT_DELAY_MS};
pub use command::SequencerAction;
pub use driver::{DriverAdapter, DriverHooks, FromPin, NoHooks, PixelBuffer, Strip};
pub use frame_buffer::FrameBuffer;
pub use playlist::{Playlist, PlaylistBuilder};
pub use registry::{Animation, AnimationRegistry, BUILTIN_COUNT};
pub use sequencer::{
    AnimationSequencer, SequenceHooks, SequencerOptions, ServiceTiming, TriggerMode,
};
#[cfg(feature = "smart-leds")]
pub use smart_strip::SmartLedsBuffer;
#[cfg(feature = "embassy")]
pub use time::EmbassyClock;
pub use time::{
    MAX_SCHEDULE_MS, TickDuration, TickInstant, TimeDuration, TimeInstant, TimeSource,
};
pub use types::{
    AnimationState, AnimationStep, AttributeValue, Attributes, MAX_ATTRIBUTES, PixelColor,
    SequenceError,
};
