//! Chase segment state machine
//!
//! A segment sweeps a running (`fill`) color across its bounds one stride at
//! a time, restoring the background (`origin`) color behind the leading edge.
//! Once the edge has run past the far boundary the next call erases the last
//! stride and reports [`Step::Completed`]; with `wrap` set the sweep restarts
//! from the entry boundary, otherwise the edge parks on the far boundary.
//!
//! All painting is clamped to the segment, cells outside `[start, end]` are
//! never written.

use crate::Rgb;
use crate::bounds::{RotationBounds, SegmentBounds, bounded};
use crate::rotate;

/// Sweep direction of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards higher indices, entering at `start`
    Left,
    /// Towards lower indices, entering at `end`
    Right,
}

impl Direction {
    const fn sign(self) -> i32 {
        match self {
            Self::Left => 1,
            Self::Right => -1,
        }
    }
}

/// Result of advancing a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The leading edge moved and the sweep continues
    InProgress,
    /// The sweep ran out and its last cells were restored
    Completed,
}

impl Step {
    /// Check if the sweep completed
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Independently animated sub-range of the LED buffer
#[derive(Debug, Clone)]
pub struct Segment {
    bounds: SegmentBounds,
    /// Next cell to paint. Runs up to one stride past the far boundary,
    /// which marks the sweep as exhausted until the next call.
    edge: i32,
    fill: Rgb,
    origin: Rgb,
    direction: Direction,
}

impl Segment {
    /// Create a new segment with the edge on its entry boundary
    ///
    /// The buffer is not touched, call [`Segment::init`] to paint the
    /// background.
    #[allow(clippy::cast_lossless)]
    pub const fn new(bounds: SegmentBounds, direction: Direction, fill: Rgb, origin: Rgb) -> Self {
        Self {
            bounds,
            edge: bounds.entry(direction) as i32,
            fill,
            origin,
            direction,
        }
    }

    /// Reset the edge to the entry boundary and paint the whole segment
    /// with the background color
    pub fn init(&mut self, leds: &mut [Rgb]) {
        self.edge = i32::from(self.bounds.entry(self.direction));
        bounded(leds, self.bounds).fill(self.origin);
    }

    /// Move the leading edge by one cell in the segment's direction
    pub fn advance_one(&mut self, leds: &mut [Rgb], wrap: bool) -> Step {
        self.stride(leds, 1, wrap)
    }

    /// Move the leading edge by `num` cells in `direction`
    ///
    /// `num == 0` is treated as `1`. If `direction` differs from the current
    /// one the sweep restarts from the new entry boundary instead of
    /// reversing mid-stride.
    pub fn advance_by(&mut self, leds: &mut [Rgb], direction: Direction, wrap: bool, num: u8) -> Step {
        if self.direction != direction {
            self.direction = direction;
            self.edge = i32::from(self.bounds.entry(direction));
        }
        self.stride(leds, num.max(1), wrap)
    }

    /// Rotate the colors in `[start, end - 1]` one cell towards `start`
    ///
    /// The segment's `end` is used as an exclusive bound here, so its last
    /// cell is not part of the rotation.
    pub fn rotate_left(&self, leds: &mut [Rgb]) {
        rotate::rotate_left(leds, RotationBounds::from(self.bounds));
    }

    /// Rotate the colors in `[start, end - 1]` one cell towards `end - 1`
    pub fn rotate_right(&self, leds: &mut [Rgb]) {
        rotate::rotate_right(leds, RotationBounds::from(self.bounds));
    }

    /// Get the cells covered by the segment
    pub const fn bounds(&self) -> SegmentBounds {
        self.bounds
    }

    /// Get the current sweep direction
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Get the running color
    pub const fn fill(&self) -> Rgb {
        self.fill
    }

    /// Get the background color
    pub const fn origin(&self) -> Rgb {
        self.origin
    }

    /// Position of the leading edge, always within the segment
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn current(&self) -> u16 {
        let start = i32::from(self.bounds.start);
        let end = i32::from(self.bounds.end);
        self.edge.clamp(start, end) as u16
    }

    fn stride(&mut self, leds: &mut [Rgb], num: u8, wrap: bool) -> Step {
        let num = i32::from(num);
        let sign = self.direction.sign();

        if self.bounds.contains(self.edge) {
            for i in 0..num {
                self.paint(leds, self.edge + sign * i, self.fill);
            }
            // Nothing is behind the edge yet on the first stride
            if self.edge != i32::from(self.bounds.entry(self.direction)) {
                self.erase_behind(leds, num);
            }
            self.edge += sign * num;
            return Step::InProgress;
        }

        self.erase_behind(leds, num);
        let restart = if wrap {
            self.bounds.entry(self.direction)
        } else {
            self.bounds.far(self.direction)
        };
        self.edge = i32::from(restart);
        Step::Completed
    }

    /// Restore the `num` cells right behind the edge
    fn erase_behind(&self, leds: &mut [Rgb], num: i32) {
        let sign = self.direction.sign();
        for i in 1..=num {
            self.paint(leds, self.edge - sign * i, self.origin);
        }
    }

    #[allow(clippy::cast_sign_loss)]
    fn paint(&self, leds: &mut [Rgb], position: i32, color: Rgb) {
        if self.bounds.contains(position) {
            leds[position as usize] = color;
        }
    }
}
