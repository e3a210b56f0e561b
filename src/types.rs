//! Core types for playlists and animation state.

use heapless::LinearMap;
use palette::Srgb;

/// Maximum number of entries an [`Attributes`] map can hold.
pub const MAX_ATTRIBUTES: usize = 8;

/// A single pixel value: 8 bits per channel, passed to hardware as-is.
pub type PixelColor = Srgb<u8>;

/// A loosely typed attribute value.
///
/// Effects read attributes through the defaulting accessors on
/// [`Attributes`], so a value of the wrong variant behaves like a missing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeValue {
    Int(i32),
    Bool(bool),
    Color(PixelColor),
}

impl AttributeValue {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            AttributeValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<PixelColor> {
        match self {
            AttributeValue::Color(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<PixelColor> for AttributeValue {
    fn from(value: PixelColor) -> Self {
        AttributeValue::Color(value)
    }
}

impl From<(u8, u8, u8)> for AttributeValue {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        AttributeValue::Color(Srgb::new(red, green, blue))
    }
}

/// Fixed-capacity key/value map used for step attributes and effect payloads.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    entries: LinearMap<&'static str, AttributeValue, MAX_ATTRIBUTES>,
}

impl Attributes {
    /// Creates an empty attribute map.
    pub const fn new() -> Self {
        Self {
            entries: LinearMap::new(),
        }
    }

    /// Inserts or replaces a value, returning the previous one.
    ///
    /// # Errors
    /// * `AttributeCapacityExceeded` - The map is full and `key` is new
    pub fn insert(
        &mut self,
        key: &'static str,
        value: impl Into<AttributeValue>,
    ) -> Result<Option<AttributeValue>, SequenceError> {
        self.entries
            .insert(key, value.into())
            .map_err(|_| SequenceError::AttributeCapacityExceeded)
    }

    /// Builder-style insert.
    ///
    /// # Panics
    /// Panics if the attribute capacity is exceeded.
    pub fn with(mut self, key: &'static str, value: impl Into<AttributeValue>) -> Self {
        if self.insert(key, value).is_err() {
            panic!("attribute capacity exceeded");
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &AttributeValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    /// Integer value for `key`, if present and an integer.
    pub fn int(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(AttributeValue::as_int)
    }

    pub fn int_or(&self, key: &str, default: i32) -> i32 {
        self.int(key).unwrap_or(default)
    }

    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.get(key)
            .and_then(AttributeValue::as_bool)
            .unwrap_or(default)
    }

    pub fn color_or(&self, key: &str, default: PixelColor) -> PixelColor {
        self.get(key)
            .and_then(AttributeValue::as_color)
            .unwrap_or(default)
    }
}

/// State carried between frames of one running animation.
///
/// `delay` is the interval until the next frame in milliseconds. Leaving it
/// `None` keeps whatever interval was in effect before; `Some(0)` stops the
/// animation's own timer. `payload` belongs entirely to the effect.
#[derive(Debug, Clone, Default)]
pub struct AnimationState {
    pub delay: Option<u32>,
    pub payload: Attributes,
}

impl AnimationState {
    /// Creates an empty state with no delay preference.
    pub const fn new() -> Self {
        Self {
            delay: None,
            payload: Attributes::new(),
        }
    }

    /// Creates a state carrying only a payload.
    pub fn with_payload(payload: Attributes) -> Self {
        Self {
            delay: None,
            payload,
        }
    }

    /// Sets the frame delay in milliseconds.
    pub fn delay(mut self, millis: u32) -> Self {
        self.delay = Some(millis);
        self
    }
}

/// One playlist entry.
#[derive(Debug, Clone)]
pub struct AnimationStep<'a> {
    /// Effect name. `None` shows a blank strip.
    pub name: Option<&'a str>,

    /// How long the step plays. `None` or zero plays until advanced manually.
    /// Values above [`MAX_SCHEDULE_MS`](crate::time::MAX_SCHEDULE_MS) are capped.
    pub duration_ms: Option<u32>,

    /// Effect attributes.
    pub attributes: Attributes,
}

impl<'a> AnimationStep<'a> {
    /// Creates a new playlist step.
    #[inline]
    pub fn new(name: Option<&'a str>, duration_ms: Option<u32>, attributes: Attributes) -> Self {
        Self {
            name,
            duration_ms,
            attributes,
        }
    }

    /// Returns the step duration if it should expire on its own.
    #[inline]
    pub fn timed_duration(&self) -> Option<u32> {
        self.duration_ms.filter(|&millis| millis != 0)
    }
}

/// Playlist and attribute construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// No steps provided.
    EmptyPlaylist,

    /// Playlist capacity exceeded.
    CapacityExceeded,

    /// Attribute map capacity exceeded.
    AttributeCapacityExceeded,
}

impl core::fmt::Display for SequenceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SequenceError::EmptyPlaylist => {
                write!(f, "playlist must have at least one step")
            }
            SequenceError::CapacityExceeded => {
                write!(f, "playlist capacity exceeded")
            }
            SequenceError::AttributeCapacityExceeded => {
                write!(f, "attribute capacity of {} exceeded", MAX_ATTRIBUTES)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SequenceError {}
