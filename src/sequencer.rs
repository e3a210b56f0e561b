//! Playlist sequencer with step timing and manual control.
//!
//! Provides [`AnimationSequencer`] which walks a [`Playlist`] on a strip,
//! retiring each step's [`AnimationRuntime`] when the step's duration runs out
//! and starting the next one. Also defines [`SequenceHooks`] for steering
//! playback from the host.

use crate::animation::AnimationRuntime;
use crate::command::SequencerAction;
use crate::driver::Strip;
use crate::playlist::Playlist;
use crate::registry::AnimationRegistry;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::AnimationStep;

/// How playback advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriggerMode {
    /// `check_event` advances frames and steps from the clock.
    #[default]
    Automatic,
    /// Frames and steps only move through `trigger_frame` and `advance`.
    Manual,
}

/// Timing information returned by [`AnimationSequencer::check_event`].
///
/// Indicates when the sequencer needs to be serviced again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// Something is scheduled. Service again after at most this delay.
    Delay(D),

    /// Nothing is scheduled. The strip holds its current frame until the host
    /// triggers a frame or advances the playlist.
    Idle,
}

/// Host callbacks consulted when a timed step runs out.
///
/// Both hooks may return an index to jump to instead of the default. Returned
/// indices are clamped into `[0, len]` before use, so returning `len` wraps
/// back to the first step.
pub trait SequenceHooks {
    /// Called before moving to `candidate`, which is inside the playlist.
    fn on_advance(&mut self, candidate: usize) -> Option<isize> {
        let _ = candidate;
        None
    }

    /// Called instead of `on_advance` when the last step runs out.
    /// Without an override playback restarts from the first step.
    fn on_sequence_end(&mut self) -> Option<isize> {
        None
    }
}

impl SequenceHooks for crate::driver::NoHooks {}

/// Construction options for [`AnimationSequencer`].
#[derive(Debug, Clone, Default)]
pub struct SequencerOptions<H> {
    pub mode: TriggerMode,
    pub hooks: H,
}

/// Plays a playlist of named animations on a strip.
///
/// The sequencer owns the strip, the effect registry and the playlist. The
/// host calls [`check_event`](Self::check_event) from its main loop; nothing
/// happens between calls.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `'a` - Lifetime of registered effects and effect names
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `S` - Strip implementation type
/// * `H` - Sequence hooks type
/// * `STEPS` - Maximum number of playlist steps
/// * `EFFECTS` - Maximum number of registered effects
pub struct AnimationSequencer<
    't,
    'a,
    I: TimeInstant,
    T: TimeSource<I>,
    S: Strip,
    H: SequenceHooks,
    const STEPS: usize,
    const EFFECTS: usize,
> {
    strip: S,
    time_source: &'t T,
    registry: AnimationRegistry<'a, EFFECTS>,
    playlist: Playlist<'a, STEPS>,
    hooks: H,
    mode: TriggerMode,
    cursor: usize,
    runtime: AnimationRuntime<'a, I>,
    step_started: I,
    step_deadline: Option<I>,
}

impl<'t, 'a, I, T, S, const STEPS: usize, const EFFECTS: usize>
    AnimationSequencer<'t, 'a, I, T, S, crate::driver::NoHooks, STEPS, EFFECTS>
where
    I: TimeInstant,
    T: TimeSource<I>,
    S: Strip,
{
    /// Creates an automatic sequencer without hooks and starts the first step.
    pub fn new(
        strip: S,
        registry: AnimationRegistry<'a, EFFECTS>,
        playlist: Playlist<'a, STEPS>,
        time_source: &'t T,
    ) -> Self {
        Self::with_options(strip, registry, playlist, time_source, SequencerOptions::default())
    }
}

impl<'t, 'a, I, T, S, H, const STEPS: usize, const EFFECTS: usize>
    AnimationSequencer<'t, 'a, I, T, S, H, STEPS, EFFECTS>
where
    I: TimeInstant,
    T: TimeSource<I>,
    S: Strip,
    H: SequenceHooks,
{
    /// Creates a sequencer and starts the first step.
    pub fn with_options(
        mut strip: S,
        registry: AnimationRegistry<'a, EFFECTS>,
        playlist: Playlist<'a, STEPS>,
        time_source: &'t T,
        options: SequencerOptions<H>,
    ) -> Self {
        let now = time_source.now();
        let (runtime, step_deadline) = launch(&mut strip, &registry, &playlist, 0, now);

        Self {
            strip,
            time_source,
            registry,
            playlist,
            hooks: options.hooks,
            mode: options.mode,
            cursor: 0,
            runtime,
            step_started: now,
            step_deadline,
        }
    }

    /// Handles a sequencer action by dispatching to the appropriate method.
    pub fn handle_action(&mut self, action: SequencerAction) -> ServiceTiming<I::Duration> {
        match action {
            SequencerAction::Advance => self.advance(),
            SequencerAction::TriggerFrame => self.trigger_frame(),
            SequencerAction::JumpTo(index) => self.start_step(index),
            SequencerAction::SetMode(mode) => self.set_mode(mode),
        }
        self.next_service(self.time_source.now())
    }

    /// Services the sequencer. Call this on every iteration of the host loop.
    ///
    /// In automatic mode this moves to the next step once the current step's
    /// duration has run out, and otherwise runs the current effect's next
    /// frame when it is due. In manual mode it does nothing.
    pub fn check_event(&mut self) -> ServiceTiming<I::Duration> {
        if self.mode == TriggerMode::Manual {
            return ServiceTiming::Idle;
        }

        let now = self.time_source.now();
        match self.step_deadline {
            Some(deadline) if now.is_past(deadline) => {
                let next = self.resolve_next_step();
                self.start_step_at(next, now);
            }
            _ => {
                self.runtime.check_event(&mut self.strip, now);
            }
        }

        self.next_service(now)
    }

    /// Starts playlist step `index`, wrapping it onto the playlist first.
    ///
    /// The previous effect is dropped without any teardown.
    pub fn start_step(&mut self, index: isize) {
        let now = self.time_source.now();
        self.start_step_at(index, now);
    }

    /// Moves to the step after the current one, wrapping at the end.
    ///
    /// Hooks are not consulted.
    pub fn advance(&mut self) {
        self.start_step(self.cursor as isize + 1);
    }

    /// Runs the current effect's next frame right away.
    pub fn trigger_frame(&mut self) {
        let now = self.time_source.now();
        self.runtime.trigger_event(&mut self.strip, now);
    }

    fn start_step_at(&mut self, index: isize, now: I) {
        let cursor = self.playlist.normalize(index);
        let (runtime, step_deadline) =
            launch(&mut self.strip, &self.registry, &self.playlist, cursor, now);

        self.cursor = cursor;
        self.runtime = runtime;
        self.step_started = now;
        self.step_deadline = step_deadline;
    }

    /// Picks the step that follows a finished one, letting the hooks override.
    fn resolve_next_step(&mut self) -> isize {
        let len = self.playlist.len();
        let candidate = self.cursor + 1;
        let clamp = |index: isize| index.clamp(0, len as isize);

        if candidate >= len {
            self.hooks
                .on_sequence_end()
                .map(clamp)
                .unwrap_or(len as isize)
        } else {
            self.hooks
                .on_advance(candidate)
                .map(clamp)
                .unwrap_or(candidate as isize)
        }
    }

    fn next_service(&self, now: I) -> ServiceTiming<I::Duration> {
        if self.mode == TriggerMode::Manual {
            return ServiceTiming::Idle;
        }

        let step = self.step_deadline.map(|deadline| now.until(deadline));
        let frame = self.runtime.deadline().map(|deadline| now.until(deadline));
        let nearest = match (step, frame) {
            (Some(step), Some(frame)) => Some(if step.as_millis() <= frame.as_millis() {
                step
            } else {
                frame
            }),
            (step, frame) => step.or(frame),
        };

        nearest.map_or(ServiceTiming::Idle, ServiceTiming::Delay)
    }

    /// Index of the step currently playing.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The step currently playing.
    pub fn current_step(&self) -> &AnimationStep<'a> {
        // The cursor is always normalized and playlists are never empty.
        &self.playlist.as_slice()[self.cursor]
    }

    pub fn mode(&self) -> TriggerMode {
        self.mode
    }

    /// Switches between automatic and manual playback.
    ///
    /// Deadlines keep running while in manual mode, so a step whose duration
    /// ran out meanwhile ends on the first `check_event` after switching back.
    pub fn set_mode(&mut self, mode: TriggerMode) {
        self.mode = mode;
    }

    /// Time since the current step started.
    pub fn step_elapsed(&self) -> I::Duration {
        self.time_source.now().duration_since(self.step_started)
    }

    pub fn runtime(&self) -> &AnimationRuntime<'a, I> {
        &self.runtime
    }

    pub fn strip(&self) -> &S {
        &self.strip
    }

    /// Direct access to the strip. Changes show up on the next flush.
    pub fn strip_mut(&mut self) -> &mut S {
        &mut self.strip
    }

    pub fn registry(&self) -> &AnimationRegistry<'a, EFFECTS> {
        &self.registry
    }

    /// Mutable registry access. Changes apply from the next step started.
    pub fn registry_mut(&mut self) -> &mut AnimationRegistry<'a, EFFECTS> {
        &mut self.registry
    }

    pub fn playlist(&self) -> &Playlist<'a, STEPS> {
        &self.playlist
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }
}

/// Builds the runtime for playlist step `cursor` and its step deadline.
///
/// `cursor` must already be normalized.
fn launch<'a, I, S, const STEPS: usize, const EFFECTS: usize>(
    strip: &mut S,
    registry: &AnimationRegistry<'a, EFFECTS>,
    playlist: &Playlist<'a, STEPS>,
    cursor: usize,
    now: I,
) -> (AnimationRuntime<'a, I>, Option<I>)
where
    I: TimeInstant,
    S: Strip,
{
    let step = &playlist.as_slice()[cursor];

    #[cfg(feature = "defmt")]
    defmt::debug!("starting step {} ({})", cursor, step.name.unwrap_or("blank"));

    let runtime = AnimationRuntime::new(strip, registry, step.name, &step.attributes, now);
    let deadline = step.timed_duration().map(|millis| now.deadline_after(millis));

    (runtime, deadline)
}
