//! Time abstraction traits for platform-agnostic timing.
//!
//! All scheduling decisions compare instants through [`TimeInstant::ticks_diff`],
//! a signed difference that stays correct when a fixed-width tick counter
//! rolls over. Never compare absolute counter values directly.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;
}

/// Longest offset a deadline can be scheduled ahead of now.
///
/// Past this, [`TimeInstant::ticks_diff`] on a 32-bit counter would read the
/// deadline as already passed.
pub const MAX_SCHEDULE_MS: u32 = i32::MAX as u32;

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, wrapping around on counter overflow.
    fn wrapping_add(self, duration: Self::Duration) -> Self;

    /// Signed distance in milliseconds from `other` to `self`.
    ///
    /// Positive when `self` is later than `other`, even across a counter
    /// rollover, as long as the two instants are less than half the counter
    /// range apart.
    fn ticks_diff(self, other: Self) -> i64;

    /// Returns true once `self` is strictly past `deadline`.
    #[inline]
    fn is_past(self, deadline: Self) -> bool {
        self.ticks_diff(deadline) > 0
    }

    /// Deadline `millis` from `self`, capped at [`MAX_SCHEDULE_MS`].
    #[inline]
    fn deadline_after(self, millis: u32) -> Self {
        let millis = millis.min(MAX_SCHEDULE_MS);
        self.wrapping_add(Self::Duration::from_millis(u64::from(millis)))
    }

    /// Time left until `deadline`, or zero if it has already passed.
    #[inline]
    fn until(self, deadline: Self) -> Self::Duration {
        let diff = deadline.ticks_diff(self);
        if diff > 0 {
            Self::Duration::from_millis(diff as u64)
        } else {
            Self::Duration::ZERO
        }
    }
}

/// Millisecond duration paired with [`TickInstant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickDuration(pub u32);

impl TimeDuration for TickDuration {
    const ZERO: Self = TickDuration(0);

    fn as_millis(&self) -> u64 {
        u64::from(self.0)
    }

    fn from_millis(millis: u64) -> Self {
        TickDuration(millis.min(u64::from(u32::MAX)) as u32)
    }
}

/// A free-running 32-bit millisecond tick counter that wraps at `u32::MAX`.
///
/// This is the shape of most microcontroller millisecond timers. Ordering
/// between two ticks is only meaningful through [`TimeInstant::ticks_diff`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInstant(pub u32);

impl TimeInstant for TickInstant {
    type Duration = TickDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TickDuration(self.0.wrapping_sub(earlier.0))
    }

    fn wrapping_add(self, duration: Self::Duration) -> Self {
        TickInstant(self.0.wrapping_add(duration.0))
    }

    fn ticks_diff(self, other: Self) -> i64 {
        i64::from(self.0.wrapping_sub(other.0) as i32)
    }
}

#[cfg(feature = "embassy")]
mod embassy {
    use super::{TimeDuration, TimeInstant, TimeSource};
    use embassy_time::{Duration, Instant};

    impl TimeDuration for Duration {
        const ZERO: Self = Duration::from_ticks(0);

        fn as_millis(&self) -> u64 {
            Duration::as_millis(self)
        }

        fn from_millis(millis: u64) -> Self {
            Duration::from_millis(millis)
        }
    }

    // The embassy tick counter is 64 bits wide and does not wrap in practice.
    impl TimeInstant for Instant {
        type Duration = Duration;

        fn duration_since(&self, earlier: Self) -> Self::Duration {
            self.checked_duration_since(earlier)
                .unwrap_or(Duration::from_ticks(0))
        }

        fn wrapping_add(self, duration: Self::Duration) -> Self {
            self.checked_add(duration).unwrap_or(Instant::MAX)
        }

        fn ticks_diff(self, other: Self) -> i64 {
            self.as_millis() as i64 - other.as_millis() as i64
        }
    }

    /// Time source backed by the embassy time driver.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct EmbassyClock;

    impl TimeSource<Instant> for EmbassyClock {
        fn now(&self) -> Instant {
            Instant::now()
        }
    }
}

#[cfg(feature = "embassy")]
pub use embassy::EmbassyClock;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_diff_is_signed() {
        assert_eq!(TickInstant(150).ticks_diff(TickInstant(100)), 50);
        assert_eq!(TickInstant(100).ticks_diff(TickInstant(150)), -50);
        assert_eq!(TickInstant(7).ticks_diff(TickInstant(7)), 0);
    }

    #[test]
    fn ticks_diff_survives_rollover() {
        let before = TickInstant(u32::MAX - 9);
        let after = before.wrapping_add(TickDuration(20));

        assert_eq!(after, TickInstant(10));
        assert_eq!(after.ticks_diff(before), 20);
        assert_eq!(before.ticks_diff(after), -20);
        assert!(after.is_past(before));
        assert!(!before.is_past(after));
    }

    #[test]
    fn until_saturates_at_zero() {
        let now = TickInstant(1_000);
        assert_eq!(now.until(TickInstant(1_250)), TickDuration(250));
        assert_eq!(now.until(TickInstant(900)), TickDuration::ZERO);
    }

    #[test]
    fn deadline_after_caps_long_offsets() {
        let now = TickInstant(u32::MAX - 99);
        let deadline = now.deadline_after(3_000_000_000);

        assert_eq!(deadline, now.wrapping_add(TickDuration(MAX_SCHEDULE_MS)));
        assert_eq!(deadline.ticks_diff(now), i64::from(MAX_SCHEDULE_MS));
        assert!(!now.wrapping_add(TickDuration(1)).is_past(deadline));
    }

    #[test]
    fn duration_since_wraps() {
        let earlier = TickInstant(u32::MAX);
        let later = TickInstant(4);
        assert_eq!(later.duration_since(earlier), TickDuration(5));
    }
}
