use super::keys::{COLORS, START_FROM_OFF};
use crate::colors::{DEFAULT_COLOR, OFF};
use crate::driver::Strip;
use crate::registry::Animation;
use crate::types::{AnimationState, Attributes};

const LIT: &str = "lit";

/// Switches the whole strip between one color and dark on every frame.
///
/// Each frame toggles first and then draws, so the first frame after setup
/// already shows the opposite of the setup frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlinkAll;

impl Animation for BlinkAll {
    fn setup(&self, strip: &mut dyn Strip, attributes: &Attributes) -> AnimationState {
        let lit = !attributes.bool_or(START_FROM_OFF, true);
        let color = attributes.color_or(COLORS, DEFAULT_COLOR);

        strip.fill(if lit { color } else { OFF });

        AnimationState::with_payload(Attributes::new().with(LIT, lit).with(COLORS, color))
    }

    fn next_step(&self, strip: &mut dyn Strip, mut state: AnimationState) -> AnimationState {
        let lit = !state.payload.bool_or(LIT, true);
        let color = state.payload.color_or(COLORS, DEFAULT_COLOR);

        strip.fill(if lit { color } else { OFF });
        strip.write();

        if state.payload.insert(LIT, lit).is_err() {
            // A full payload without `lit` is replaced so the toggle persists.
            #[cfg(feature = "defmt")]
            defmt::warn!("blink payload full, resetting it");
            state.payload = Attributes::new().with(LIT, lit).with(COLORS, color);
        }
        state
    }
}
