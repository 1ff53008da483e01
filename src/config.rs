//! Static chase configuration
//!
//! Built once at startup and handed to [`ChaseScheduler`](crate::ChaseScheduler).
//! There is no runtime reconfiguration.

use embassy_time::Duration;

use crate::bounds::{RotationBounds, SegmentBounds};
use crate::color::{BLANK, BLUE, GREEN, RED, Rgb, WHITE, YELLOW};
use crate::segment::Direction;

/// Number of LEDs on the reference strip
pub const REFERENCE_LED_COUNT: usize = 80;

/// Output brightness of the reference strip, in percent
pub const REFERENCE_BRIGHTNESS: u8 = 30;

const REFERENCE_PERIOD: Duration = Duration::from_millis(500);
const REFERENCE_TRANSMIT_PERIOD: Duration = Duration::from_millis(20);

/// How a segment moves each time its timer times out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Move the leading edge by one cell
    Shift,
    /// Move the leading edge by the given number of cells
    Stride(u8),
    /// Rotate the colors already in the segment towards `start`
    RotateLeft,
    /// Rotate the colors already in the segment towards `end`
    RotateRight,
}

impl Motion {
    /// Check if the motion permutes the segment instead of sweeping it
    pub const fn is_rotation(self) -> bool {
        matches!(self, Self::RotateLeft | Self::RotateRight)
    }
}

/// Configuration of a single segment
#[derive(Debug, Clone, Copy)]
pub struct SegmentConfig {
    /// Cells covered by the segment
    ///
    /// Rotating motions treat `end` as exclusive, like [`RotationBounds`],
    /// so `end` may equal the strip length to rotate up to the last LED.
    pub bounds: SegmentBounds,
    pub direction: Direction,
    /// Running color painted at the leading edge
    pub fill: Rgb,
    /// Background color restored behind the edge
    pub origin: Rgb,
    pub motion: Motion,
    /// Restart the sweep after it completes
    pub wrap: bool,
    /// Time between two moves
    pub period: Duration,
}

/// Configuration of the whole strip
///
/// Segment `i` is paced by timer `i`.
#[derive(Debug, Clone, Copy)]
pub struct ChaseConfig<const S: usize> {
    pub segments: [SegmentConfig; S],
    /// Time between two pushes of the buffer to the strip
    pub transmit_period: Duration,
}

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Segment `start` is past its `end`
    InvertedBounds { segment: usize },
    /// Segment `end` is outside the strip
    SegmentOutOfRange {
        segment: usize,
        end: u16,
        led_count: usize,
    },
    /// Strip has more LEDs than a `u16` index can address
    StripTooLong { led_count: usize },
    /// Timer source cannot pace every segment plus the transmit
    NotEnoughTimers { needed: usize, available: usize },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvertedBounds { segment } => {
                write!(f, "segment {} starts after its end", segment)
            }
            ConfigError::SegmentOutOfRange {
                segment,
                end,
                led_count,
            } => {
                write!(
                    f,
                    "segment {} ends at LED {}, but the strip has {} LEDs",
                    segment, end, led_count
                )
            }
            ConfigError::StripTooLong { led_count } => {
                write!(f, "strip of {} LEDs cannot be addressed", led_count)
            }
            ConfigError::NotEnoughTimers { needed, available } => {
                write!(f, "{} timers needed, but only {} available", needed, available)
            }
        }
    }
}

impl core::error::Error for ConfigError {}

impl<const S: usize> ChaseConfig<S> {
    /// Check every segment against a strip of `led_count` LEDs
    pub fn validate(&self, led_count: usize) -> Result<(), ConfigError> {
        if led_count > usize::from(u16::MAX) + 1 {
            return Err(ConfigError::StripTooLong { led_count });
        }

        for (segment, config) in self.segments.iter().enumerate() {
            let bounds = config.bounds;
            if bounds.start > bounds.end {
                return Err(ConfigError::InvertedBounds { segment });
            }
            let fits = if config.motion.is_rotation() {
                RotationBounds::from(bounds).fits(led_count)
            } else {
                bounds.fits(led_count)
            };
            if !fits {
                return Err(ConfigError::SegmentOutOfRange {
                    segment,
                    end: bounds.end,
                    led_count,
                });
            }
        }

        Ok(())
    }
}

/// Three wrapping chases over an 80 LED strip
///
/// Pair with [`REFERENCE_LED_COUNT`] and [`REFERENCE_BRIGHTNESS`].
pub const fn reference_config() -> ChaseConfig<3> {
    ChaseConfig {
        segments: [
            SegmentConfig {
                bounds: SegmentBounds::new(0, 19),
                direction: Direction::Right,
                fill: YELLOW,
                origin: RED,
                motion: Motion::Stride(4),
                wrap: true,
                period: REFERENCE_PERIOD,
            },
            SegmentConfig {
                bounds: SegmentBounds::new(20, 39),
                direction: Direction::Left,
                fill: BLANK,
                origin: BLUE,
                motion: Motion::Stride(3),
                wrap: true,
                period: REFERENCE_PERIOD,
            },
            SegmentConfig {
                bounds: SegmentBounds::new(40, 79),
                direction: Direction::Right,
                fill: WHITE,
                origin: GREEN,
                motion: Motion::Stride(4),
                wrap: true,
                period: REFERENCE_PERIOD,
            },
        ],
        transmit_period: REFERENCE_TRANSMIT_PERIOD,
    }
}
