use crate::Rgb;
use crate::segment::Direction;

/// Inclusive range of LEDs animated by a segment
///
/// Both `start` and `end` are valid buffer indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentBounds {
    pub start: u16,
    pub end: u16,
}

impl SegmentBounds {
    /// Create new bounds
    ///
    /// Panics if `start > end`.
    pub const fn new(start: u16, end: u16) -> Self {
        assert!(start <= end, "segment start must not exceed its end");
        Self { start, end }
    }

    /// Get the number of LEDs in the segment
    #[allow(clippy::cast_lossless)]
    pub const fn count(self) -> usize {
        self.end as usize - self.start as usize + 1
    }

    /// Check if a (possibly out of range) position lies inside the segment
    #[allow(clippy::cast_lossless)]
    pub const fn contains(self, position: i32) -> bool {
        position >= self.start as i32 && position <= self.end as i32
    }

    /// Check if the segment fits into a buffer of `len` LEDs
    #[allow(clippy::cast_lossless)]
    pub const fn fits(self, len: usize) -> bool {
        (self.end as usize) < len
    }

    /// Boundary a sweep in `direction` starts from
    pub const fn entry(self, direction: Direction) -> u16 {
        match direction {
            Direction::Left => self.start,
            Direction::Right => self.end,
        }
    }

    /// Boundary a sweep in `direction` runs towards
    pub const fn far(self, direction: Direction) -> u16 {
        match direction {
            Direction::Left => self.end,
            Direction::Right => self.start,
        }
    }
}

/// Window of LEDs permuted by a rotation
///
/// Unlike [`SegmentBounds`], `end` is exclusive: the rotated cells are
/// `start..end`. Passing the strip length as `end` rotates up to the last LED.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationBounds {
    pub start: u16,
    pub end: u16,
}

impl RotationBounds {
    /// Get the number of LEDs in the window
    pub const fn count(self) -> u16 {
        self.end.saturating_sub(self.start)
    }

    /// Check if the window fits into a buffer of `len` LEDs
    #[allow(clippy::cast_lossless)]
    pub const fn fits(self, len: usize) -> bool {
        self.end as usize <= len
    }
}

impl From<SegmentBounds> for RotationBounds {
    /// Rotation over a segment keeps its `end` as the exclusive bound,
    /// so the segment's last LED stays in place.
    fn from(bounds: SegmentBounds) -> Self {
        Self {
            start: bounds.start,
            end: bounds.end,
        }
    }
}

/// Get a slice of the LEDs within the segment
pub(crate) fn bounded(leds: &mut [Rgb], bounds: SegmentBounds) -> &mut [Rgb] {
    &mut leds[usize::from(bounds.start)..=usize::from(bounds.end)]
}

/// Get a slice of the LEDs within the rotation window
pub(crate) fn window(leds: &mut [Rgb], bounds: RotationBounds) -> &mut [Rgb] {
    let start = usize::from(bounds.start);
    let end = usize::from(bounds.end).max(start);
    &mut leds[start..end]
}
