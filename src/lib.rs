#![no_std]

pub mod bounds;
pub mod color;
pub mod config;
pub mod output;
pub mod rotate;
pub mod scheduler;
pub mod segment;
pub mod timer;

pub use bounds::{RotationBounds, SegmentBounds};
pub use config::{
    ChaseConfig, ConfigError, Motion, REFERENCE_BRIGHTNESS, REFERENCE_LED_COUNT, SegmentConfig,
    reference_config,
};
pub use output::{Brightness, SmartLedsOutput};
pub use scheduler::{ChaseScheduler, LocalTimers, MAX_CATCH_UP_TICKS, PollOutcome};
pub use segment::{Direction, Segment, Step};
pub use timer::{
    SharedTimerBank, TICK_DURATION, Timer, TimerBank, TimerId, TimerSource, TimerState, ticks_for,
};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The scheduler hands it the whole buffer on every transmit.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
