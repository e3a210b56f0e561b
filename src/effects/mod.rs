//! Built-in effects.
//!
//! Register them all at once with [`AnimationRegistry::with_builtins`], or
//! individually under names of your choosing.
//!
//! [`AnimationRegistry::with_builtins`]: crate::registry::AnimationRegistry::with_builtins

mod blink;
mod tail;

pub use blink::BlinkAll;
pub use tail::{MoveLeftWithTail, MoveRightWithTail};

pub const MOVE_LEFT_WITH_TAIL: &str = "move_left_with_tail";
pub const MOVE_RIGHT_WITH_TAIL: &str = "move_right_with_tail";
pub const BLINK_ALL: &str = "blink_all";

/// Attribute keys understood by the built-in effects.
pub mod keys {
    /// Number of moving heads (int, default 1).
    pub const ACTIVE_COUNT: &str = "active_count";
    /// Longest tail behind each head (int, default 10, at least 1).
    pub const MAX_TAIL_COUNT: &str = "max_tail_count";
    /// Lit color (color, default 200/200/200).
    pub const COLORS: &str = "colors";
    /// Whether blinking starts dark (bool, default true).
    pub const START_FROM_OFF: &str = "start_from_off";
    /// Frame interval in milliseconds (int, default 500).
    pub const SPEED: &str = "speed";
}
