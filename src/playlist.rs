use crate::types::{AnimationStep, Attributes, SequenceError};
use heapless::Vec;

/// An ordered list of animation steps.
///
/// Steps play in insertion order and the playlist wraps around at the end.
/// A playlist always holds at least one step.
///
/// # Type Parameters
/// * `'a` - Lifetime of the effect names
/// * `N` - Maximum number of steps this playlist can hold
#[derive(Debug, Clone)]
pub struct Playlist<'a, const N: usize> {
    steps: Vec<AnimationStep<'a>, N>,
}

impl<'a, const N: usize> Playlist<'a, N> {
    /// Creates a new playlist builder.
    pub fn builder() -> PlaylistBuilder<'a, N> {
        PlaylistBuilder::new()
    }

    /// Returns the number of steps in this playlist.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns a reference to the step at the given index.
    pub fn get(&self, index: usize) -> Option<&AnimationStep<'a>> {
        self.steps.get(index)
    }

    /// Wraps any integer index onto a step position.
    pub fn normalize(&self, index: isize) -> usize {
        index.rem_euclid(self.steps.len() as isize) as usize
    }

    pub fn as_slice(&self) -> &[AnimationStep<'a>] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationStep<'a>> {
        self.steps.iter()
    }
}

/// Builder for constructing validated playlists.
#[derive(Debug)]
pub struct PlaylistBuilder<'a, const N: usize> {
    steps: Vec<AnimationStep<'a>, N>,
}

impl<'a, const N: usize> PlaylistBuilder<'a, N> {
    /// Creates a new empty playlist builder.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Adds a step running `name` for `duration_ms` with default attributes.
    ///
    /// A duration of zero keeps the step on until it is advanced by hand.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if the playlist is full.
    pub fn step(self, name: &'a str, duration_ms: u32) -> Result<Self, SequenceError> {
        self.push(AnimationStep::new(Some(name), Some(duration_ms), Attributes::new()))
    }

    /// Adds a step running `name` for `duration_ms` with `attributes`.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if the playlist is full.
    pub fn step_with(
        self,
        name: &'a str,
        duration_ms: u32,
        attributes: Attributes,
    ) -> Result<Self, SequenceError> {
        self.push(AnimationStep::new(Some(name), Some(duration_ms), attributes))
    }

    /// Adds a step that keeps the strip dark for `duration_ms`.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if the playlist is full.
    pub fn blank(self, duration_ms: u32) -> Result<Self, SequenceError> {
        self.push(AnimationStep::new(None, Some(duration_ms), Attributes::new()))
    }

    /// Adds a fully specified step.
    ///
    /// # Errors
    /// Returns `CapacityExceeded` if the playlist is full.
    pub fn push(mut self, step: AnimationStep<'a>) -> Result<Self, SequenceError> {
        self.steps
            .push(step)
            .map_err(|_| SequenceError::CapacityExceeded)?;
        Ok(self)
    }

    /// Builds and validates the playlist.
    ///
    /// # Errors
    /// * `EmptyPlaylist` - No steps were added
    pub fn build(self) -> Result<Playlist<'a, N>, SequenceError> {
        if self.steps.is_empty() {
            return Err(SequenceError::EmptyPlaylist);
        }

        Ok(Playlist { steps: self.steps })
    }
}

impl<const N: usize> Default for PlaylistBuilder<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
