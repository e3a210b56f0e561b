use super::keys::{ACTIVE_COUNT, COLORS, MAX_TAIL_COUNT};
use crate::colors::{DEFAULT_COLOR, OFF, scale};
use crate::driver::Strip;
use crate::registry::Animation;
use crate::types::{AnimationState, Attributes, PixelColor};

struct TailLayout {
    heads: usize,
    max_tail: usize,
    color: PixelColor,
}

impl TailLayout {
    fn from_attributes(attributes: &Attributes, len: usize) -> Self {
        let heads = attributes.int_or(ACTIVE_COUNT, 1).max(1) as usize;
        let max_tail = attributes.int_or(MAX_TAIL_COUNT, 10).max(1) as usize;
        Self {
            // Past one head per pixel every group is a single lit pixel anyway.
            heads: heads.min(len),
            max_tail,
            color: attributes.color_or(COLORS, DEFAULT_COLOR),
        }
    }

    /// Brightness of the `offset`-th pixel of a tail `tail` pixels long.
    fn shade(&self, offset: usize, tail: usize) -> PixelColor {
        scale(self.color, tail - offset, tail)
    }
}

/// Heads with fading tails that travel towards pixel 0 and wrap around.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveLeftWithTail;

impl Animation for MoveLeftWithTail {
    fn setup(&self, strip: &mut dyn Strip, attributes: &Attributes) -> AnimationState {
        strip.fill(OFF);
        let len = strip.len();
        if len == 0 {
            return AnimationState::new();
        }

        let layout = TailLayout::from_attributes(attributes, len);
        for group in 0..layout.heads {
            let head = group * len / layout.heads;
            let next_head = (group + 1) * len / layout.heads;
            let tail = (next_head - head).min(layout.max_tail);

            for offset in 0..tail {
                let index = strip.remap((head + offset) as isize);
                strip.set(index, layout.shade(offset, tail));
            }
        }

        AnimationState::new()
    }

    fn next_step(&self, strip: &mut dyn Strip, state: AnimationState) -> AnimationState {
        let len = strip.len();
        if len == 0 {
            return state;
        }

        let first = strip.get(0);
        for index in 0..len - 1 {
            let color = strip.get(index + 1);
            strip.set(index, color);
        }
        strip.set(len - 1, first);
        strip.write();

        state
    }
}

/// Heads with fading tails that travel away from pixel 0 and wrap around.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveRightWithTail;

impl Animation for MoveRightWithTail {
    fn setup(&self, strip: &mut dyn Strip, attributes: &Attributes) -> AnimationState {
        strip.fill(OFF);
        let len = strip.len();
        if len == 0 {
            return AnimationState::new();
        }

        let layout = TailLayout::from_attributes(attributes, len);
        // Groups are laid out from the end of the strip, rounding boundaries up.
        let boundary = |group: usize| len - (group * len).div_ceil(layout.heads);
        for group in 0..layout.heads {
            let head = boundary(group);
            let next_head = boundary(group + 1);
            let tail = (head - next_head).min(layout.max_tail);

            for offset in 0..tail {
                let index = strip.remap(head as isize - 1 - offset as isize);
                strip.set(index, layout.shade(offset, tail));
            }
        }

        AnimationState::new()
    }

    fn next_step(&self, strip: &mut dyn Strip, state: AnimationState) -> AnimationState {
        let len = strip.len();
        if len == 0 {
            return state;
        }

        let last = strip.get(len - 1);
        for index in (1..len).rev() {
            let color = strip.get(index - 1);
            strip.set(index, color);
        }
        strip.set(0, last);
        strip.write();

        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::DriverAdapter;
    use crate::frame_buffer::FrameBuffer;
    use palette::Srgb;

    const AMBER: PixelColor = Srgb::new(100, 40, 0);

    #[test]
    fn single_head_tail_fades_behind_head() {
        let mut strip = DriverAdapter::from(FrameBuffer::<16>::new(12));
        let attributes = Attributes::new()
            .with(MAX_TAIL_COUNT, 4)
            .with(COLORS, AMBER);

        MoveLeftWithTail.setup(&mut strip, &attributes);

        let pixels = strip.buffer().pixels();
        assert_eq!(pixels[0], AMBER);
        assert_eq!(pixels[1], PixelColor::new(75, 30, 0));
        assert_eq!(pixels[2], PixelColor::new(50, 20, 0));
        assert_eq!(pixels[3], PixelColor::new(25, 10, 0));
        assert!(pixels[4..].iter().all(|pixel| *pixel == OFF));
    }

    #[test]
    fn right_tail_starts_at_last_pixel() {
        let mut strip = DriverAdapter::from(FrameBuffer::<16>::new(12));
        let attributes = Attributes::new()
            .with(MAX_TAIL_COUNT, 4)
            .with(COLORS, AMBER);

        MoveRightWithTail.setup(&mut strip, &attributes);

        let pixels = strip.buffer().pixels();
        assert_eq!(pixels[11], AMBER);
        assert_eq!(pixels[10], PixelColor::new(75, 30, 0));
        assert_eq!(pixels[9], PixelColor::new(50, 20, 0));
        assert_eq!(pixels[8], PixelColor::new(25, 10, 0));
        assert!(pixels[..8].iter().all(|pixel| *pixel == OFF));
    }

    #[test]
    fn heads_are_spread_evenly() {
        let mut strip = DriverAdapter::from(FrameBuffer::<16>::new(10));
        let attributes = Attributes::new().with(ACTIVE_COUNT, 3).with(MAX_TAIL_COUNT, 1);

        MoveLeftWithTail.setup(&mut strip, &attributes);

        let lit: heapless::Vec<usize, 16> = strip
            .buffer()
            .pixels()
            .iter()
            .enumerate()
            .filter(|(_, pixel)| **pixel != OFF)
            .map(|(index, _)| index)
            .collect();
        assert_eq!(lit.as_slice(), &[0, 3, 6]);
    }

    #[test]
    fn empty_strip_is_left_alone() {
        let mut strip = DriverAdapter::from(FrameBuffer::<4>::new(0));
        let state = MoveLeftWithTail.setup(&mut strip, &Attributes::new());
        MoveRightWithTail.next_step(&mut strip, state);
        assert_eq!(strip.buffer().write_count(), 0);
    }
}
