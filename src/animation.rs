//! The running instance of one playlist step's effect.
//!
//! An [`AnimationRuntime`] is created when a step starts and dropped when the
//! next one starts. It owns the effect state and the per-frame timer; the
//! strip itself is lent to it on every call.

use crate::colors::OFF;
use crate::driver::Strip;
use crate::effects::keys::SPEED;
use crate::registry::{Animation, AnimationRegistry};
use crate::time::TimeInstant;
use crate::types::{AnimationState, Attributes};

/// Frame interval used when neither the effect nor the step picks one.
pub const DEFAULT_DELAY_MS: u32 = 500;

/// Runtime for a single effect instance.
pub struct AnimationRuntime<'a, I: TimeInstant> {
    behavior: Option<&'a dyn Animation>,
    state: AnimationState,
    delay_ms: u32,
    deadline: Option<I>,
}

impl<'a, I: TimeInstant> AnimationRuntime<'a, I> {
    /// Starts the effect registered under `name` and draws its first frame.
    ///
    /// A missing name, or one the registry does not know, turns the strip off
    /// and yields a passive runtime that never advances. Either way the strip
    /// is flushed exactly once here, even if the effect already did so.
    pub fn new<const N: usize>(
        strip: &mut dyn Strip,
        registry: &AnimationRegistry<'a, N>,
        name: Option<&str>,
        attributes: &Attributes,
        now: I,
    ) -> Self {
        let behavior = name.and_then(|name| registry.lookup(name));

        let mut state = match behavior {
            Some(behavior) => behavior.setup(strip, attributes),
            None => {
                #[cfg(feature = "defmt")]
                if let Some(name) = name {
                    defmt::warn!("unknown animation {}, blanking strip", name);
                }
                strip.fill(OFF);
                AnimationState::new()
            }
        };

        let delay_ms = match behavior {
            Some(_) => state.delay.unwrap_or_else(|| speed_attribute(attributes)),
            None => 0,
        };
        state.delay = Some(delay_ms);

        strip.write();

        Self {
            behavior,
            state,
            delay_ms,
            deadline: schedule(now, delay_ms),
        }
    }

    /// Runs the next frame if its deadline has passed.
    ///
    /// Returns true if a frame ran.
    pub fn check_event(&mut self, strip: &mut dyn Strip, now: I) -> bool {
        if self.is_passive() {
            return false;
        }
        match self.deadline {
            Some(deadline) if now.is_past(deadline) => {
                self.trigger_event(strip, now);
                true
            }
            _ => false,
        }
    }

    /// Runs the next frame immediately and reschedules the one after it.
    ///
    /// The strip is not flushed here; effects write their own frames.
    pub fn trigger_event(&mut self, strip: &mut dyn Strip, now: I) {
        if let Some(behavior) = self.behavior {
            let previous = core::mem::take(&mut self.state);
            self.state = behavior.next_step(strip, previous);
            if let Some(delay_ms) = self.state.delay {
                self.delay_ms = delay_ms;
            }
            self.state.delay = Some(self.delay_ms);
        }
        self.deadline = schedule(now, self.delay_ms);
    }

    /// Returns true if no effect was found for this step.
    pub fn is_passive(&self) -> bool {
        self.behavior.is_none()
    }

    /// Current effect state.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Frame interval in milliseconds; zero means frames only run on demand.
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// When the next frame is due, if one is scheduled.
    pub fn deadline(&self) -> Option<I> {
        self.deadline
    }
}

/// Reads the `speed` attribute, falling back to [`DEFAULT_DELAY_MS`] when it
/// is missing, negative or not an integer.
fn speed_attribute(attributes: &Attributes) -> u32 {
    attributes
        .int(SPEED)
        .and_then(|speed| u32::try_from(speed).ok())
        .unwrap_or(DEFAULT_DELAY_MS)
}

fn schedule<I: TimeInstant>(now: I, delay_ms: u32) -> Option<I> {
    (delay_ms != 0).then(|| now.deadline_after(delay_ms))
}
