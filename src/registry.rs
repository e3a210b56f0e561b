//! Named animation behaviors.

use crate::driver::Strip;
use crate::effects::{
    BLINK_ALL, BlinkAll, MOVE_LEFT_WITH_TAIL, MOVE_RIGHT_WITH_TAIL, MoveLeftWithTail,
    MoveRightWithTail,
};
use crate::types::{AnimationState, Attributes};
use heapless::Vec;

/// Number of effects registered by [`AnimationRegistry::with_builtins`].
pub const BUILTIN_COUNT: usize = 3;

/// Trait for implementing an animation effect.
///
/// An effect is stateless itself; everything that changes from frame to frame
/// lives in the [`AnimationState`] it returns. The runtime flushes the strip
/// once after `setup`, but `next_step` must call [`Strip::write`] itself
/// whenever it changes pixels.
pub trait Animation {
    /// Draws the first frame and returns the initial state.
    fn setup(&self, strip: &mut dyn Strip, attributes: &Attributes) -> AnimationState;

    /// Advances one frame. The returned state replaces the previous one.
    fn next_step(&self, strip: &mut dyn Strip, state: AnimationState) -> AnimationState {
        let _ = strip;
        state
    }
}

/// Name to behavior catalog holding up to `N` effects.
pub struct AnimationRegistry<'a, const N: usize> {
    entries: Vec<(&'a str, &'a dyn Animation), N>,
}

impl<'a, const N: usize> AnimationRegistry<'a, N> {
    /// Creates an empty registry.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a registry holding the built-in effects.
    ///
    /// Needs room for at least [`BUILTIN_COUNT`] entries; effects that do not
    /// fit are skipped.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(MOVE_LEFT_WITH_TAIL, &MoveLeftWithTail, false);
        registry.register(MOVE_RIGHT_WITH_TAIL, &MoveRightWithTail, false);
        registry.register(BLINK_ALL, &BlinkAll, false);
        registry
    }

    /// Registers `behavior` under `name`.
    ///
    /// Returns `false` without changing anything if `name` is empty, if the
    /// name is taken and `overwrite` is not set, or if the registry is full.
    pub fn register(
        &mut self,
        name: &'a str,
        behavior: &'a dyn Animation,
        overwrite: bool,
    ) -> bool {
        if name.is_empty() {
            return false;
        }

        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            if !overwrite {
                #[cfg(feature = "defmt")]
                defmt::debug!("animation {} already registered", name);
                return false;
            }
            entry.1 = behavior;
            return true;
        }

        if self.entries.push((name, behavior)).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("animation registry full, dropping {}", name);
            return false;
        }
        true
    }

    /// Finds the behavior registered under `name`.
    pub fn lookup(&self, name: &str) -> Option<&'a dyn Animation> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, behavior)| *behavior)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<const N: usize> Default for AnimationRegistry<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
