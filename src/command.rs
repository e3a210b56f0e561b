//! Command-based control for sequencers.

use crate::sequencer::TriggerMode;

/// Actions for controlling a sequencer from outside its service loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequencerAction {
    /// Move to the next playlist step.
    Advance,
    /// Run the current effect's next frame now.
    TriggerFrame,
    /// Start the given step. Any index is accepted and wrapped.
    JumpTo(isize),
    /// Switch between automatic and manual playback.
    SetMode(TriggerMode),
}
