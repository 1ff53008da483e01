//! Whole-range rotation
//!
//! Rotation permutes the colors already present in a window: nothing is
//! painted and nothing is lost. There is no completion concept, callers
//! rotate once per tick for as long as the effect runs.

use crate::Rgb;
use crate::bounds::{RotationBounds, window};

/// Rotate the window one LED towards `start`
///
/// The color at `start` moves to `end - 1`.
pub fn rotate_left(leds: &mut [Rgb], bounds: RotationBounds) {
    let cells = window(leds, bounds);
    if cells.len() > 1 {
        cells.rotate_left(1);
    }
}

/// Rotate the window one LED towards `end`
///
/// The color at `end - 1` moves to `start`.
pub fn rotate_right(leds: &mut [Rgb], bounds: RotationBounds) {
    let cells = window(leds, bounds);
    if cells.len() > 1 {
        cells.rotate_right(1);
    }
}
