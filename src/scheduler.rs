//! Timer-gated chase scheduling.
//!
//! Owns the LED buffer and one [`Segment`] per configured segment. Segment
//! `i` is paced by timer `i` of a [`TimerSource`], timer `S` paces the
//! transmit. The caller supplies the time base:
//!
//! - call [`ChaseScheduler::tick`] once per [`TICK_DURATION`], or feed
//!   wall-clock instants to [`ChaseScheduler::catch_up`];
//! - or build the scheduler on a `&'static`
//!   [`SharedTimerBank`](crate::SharedTimerBank) with
//!   [`ChaseScheduler::with_timers`] and tick the bank from a periodic
//!   interrupt.
//!
//! [`ChaseScheduler::poll`] is one pass of the main loop and never blocks.
//!
//! # Usage
//!
//! ```ignore
//! let config = reference_config();
//! let mut scheduler =
//!     ChaseScheduler::<_, REFERENCE_LED_COUNT, 3>::new(&config, driver)?;
//!
//! loop {
//!     scheduler.catch_up(Instant::now());
//!     scheduler.poll();
//! }
//! ```
//!
//! With an interrupt as the time base:
//!
//! ```ignore
//! static TIMERS: SharedTimerBank<4> = SharedTimerBank::new();
//!
//! #[interrupt]
//! fn SYSTICK() {
//!     TIMERS.tick_all();
//! }
//!
//! let mut scheduler =
//!     ChaseScheduler::<_, REFERENCE_LED_COUNT, 3, _>::with_timers(&config, driver, &TIMERS)?;
//! loop {
//!     scheduler.poll();
//! }
//! ```

use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::bounds::{RotationBounds, window};
use crate::color::{BLANK, Rgb};
use crate::config::{ChaseConfig, ConfigError, Motion, SegmentConfig};
use crate::segment::{Segment, Step};
use crate::timer::{
    TICK_DURATION, Timer, TimerBank, TimerId, TimerSource, TimerState, ticks_for,
};

/// Largest backlog [`ChaseScheduler::catch_up`] replays.
///
/// If we fall behind by more than this, we skip the backlog instead of catching up.
pub const MAX_CATCH_UP_TICKS: u64 = 50;

/// What happened during one [`ChaseScheduler::poll`]
#[derive(Debug, Clone, Default)]
pub struct PollOutcome<const S: usize> {
    /// Segments whose timer timed out and that were moved
    pub advanced: Vec<usize, S>,
    /// Segments that completed a sweep
    pub completed: Vec<usize, S>,
    /// Whether the buffer was pushed to the output
    pub transmitted: bool,
}

/// Segment together with the way it is driven
#[derive(Debug, Clone)]
struct SegmentSlot {
    segment: Segment,
    motion: Motion,
    wrap: bool,
    period: u32,
}

impl SegmentSlot {
    fn new(config: &SegmentConfig) -> Self {
        Self {
            segment: Segment::new(config.bounds, config.direction, config.fill, config.origin),
            motion: config.motion,
            wrap: config.wrap,
            period: ticks_for(config.period),
        }
    }

    /// Paint the background; rotations also get one running cell at `start`
    /// to circulate
    fn init(&mut self, leds: &mut [Rgb]) {
        if !self.motion.is_rotation() {
            self.segment.init(leds);
            return;
        }

        let cells = window(leds, RotationBounds::from(self.segment.bounds()));
        cells.fill(self.segment.origin());
        if let Some(first) = cells.first_mut() {
            *first = self.segment.fill();
        }
    }

    fn animate(&mut self, leds: &mut [Rgb]) -> Step {
        match self.motion {
            Motion::Shift => self.segment.advance_one(leds, self.wrap),
            Motion::Stride(num) => {
                let direction = self.segment.direction();
                self.segment.advance_by(leds, direction, self.wrap, num)
            }
            Motion::RotateLeft => {
                self.segment.rotate_left(leds);
                Step::InProgress
            }
            Motion::RotateRight => {
                self.segment.rotate_right(leds);
                Step::InProgress
            }
        }
    }
}

/// Timers owned by a [`ChaseScheduler`]: one per segment plus the transmit
/// timer at id `S`
#[derive(Debug, Clone, Default)]
pub struct LocalTimers<const S: usize> {
    segments: TimerBank<S>,
    transmit: Timer,
}

impl<const S: usize> LocalTimers<S> {
    /// Create stopped timers
    pub const fn new() -> Self {
        Self {
            segments: TimerBank::new(),
            transmit: Timer::new(),
        }
    }

    /// Get the segment timers
    pub const fn segments(&self) -> &TimerBank<S> {
        &self.segments
    }

    /// Get the transmit timer
    pub const fn transmit(&self) -> &Timer {
        &self.transmit
    }
}

impl<const S: usize> TimerSource for LocalTimers<S> {
    fn capacity(&self) -> usize {
        S + 1
    }

    fn load(&mut self, id: TimerId, ticks: u32) {
        if usize::from(id) == S {
            self.transmit.load(ticks);
        } else {
            self.segments.load(id, ticks);
        }
    }

    fn check(&self, id: TimerId) -> TimerState {
        if usize::from(id) == S {
            self.transmit.state()
        } else {
            self.segments.check(id)
        }
    }

    fn tick_all(&mut self) -> usize {
        self.segments.tick_all() + usize::from(self.transmit.tick())
    }
}

/// Drives every configured segment from its own timer and pushes the
/// buffer to the output on the transmit cadence
pub struct ChaseScheduler<
    O: OutputDriver,
    const LEDS: usize,
    const S: usize,
    T: TimerSource = LocalTimers<S>,
> {
    output: O,
    leds: [Rgb; LEDS],
    segments: [SegmentSlot; S],
    timers: T,
    transmit_period: u32,
    last_catch_up: Option<Instant>,
}

impl<O: OutputDriver, const LEDS: usize, const S: usize> ChaseScheduler<O, LEDS, S> {
    /// Create a new scheduler with its own timers
    ///
    /// Clears the strip, pushes the blank buffer once, paints every segment's
    /// background and arms all timers.
    pub fn new(config: &ChaseConfig<S>, output: O) -> Result<Self, ConfigError> {
        Self::with_timers(config, output, LocalTimers::new())
    }
}

impl<O: OutputDriver, const LEDS: usize, const S: usize, T: TimerSource>
    ChaseScheduler<O, LEDS, S, T>
{
    /// Create a new scheduler paced by `timers`
    ///
    /// `timers` needs `S + 1` timers: one per segment and the transmit timer
    /// at id `S`. Otherwise behaves like [`ChaseScheduler::new`].
    pub fn with_timers(config: &ChaseConfig<S>, output: O, timers: T) -> Result<Self, ConfigError> {
        config.validate(LEDS)?;
        if timers.capacity() <= S {
            return Err(ConfigError::NotEnoughTimers {
                needed: S + 1,
                available: timers.capacity(),
            });
        }

        let mut scheduler = Self {
            output,
            leds: [BLANK; LEDS],
            segments: core::array::from_fn(|index| SegmentSlot::new(&config.segments[index])),
            timers,
            transmit_period: ticks_for(config.transmit_period),
            last_catch_up: None,
        };

        scheduler.output.write(&scheduler.leds);

        for (index, slot) in scheduler.segments.iter_mut().enumerate() {
            slot.init(&mut scheduler.leds);
            scheduler.timers.load(TimerId(index), slot.period);
        }
        scheduler.timers.load(TimerId(S), scheduler.transmit_period);

        Ok(scheduler)
    }

    /// Advance all timers by one quantum
    pub fn tick(&mut self) {
        self.timers.tick_all();
    }
    /// Advance the timers by the whole ticks elapsed since the previous call
    ///
    /// The first call only records `now`. A backlog above
    /// [`MAX_CATCH_UP_TICKS`] is dropped and replaced by a single tick.
    /// Returns the number of ticks applied.
    pub fn catch_up(&mut self, now: Instant) -> u64 {
        let Some(last) = self.last_catch_up else {
            self.last_catch_up = Some(now);
            return 0;
        };

        let tick_us = TICK_DURATION.as_micros();
        let elapsed = now.saturating_duration_since(last);
        let mut ticks = elapsed.as_micros() / tick_us;

        if ticks > MAX_CATCH_UP_TICKS {
            #[cfg(feature = "esp32-log")]
            println!(
                "[ChaseScheduler.catch_up] dropping backlog of {:?} ticks",
                ticks
            );
            self.last_catch_up = Some(now);
            ticks = 1;
        } else {
            // Keep the sub-tick remainder for the next call
            self.last_catch_up = Some(last + Duration::from_micros(ticks * tick_us));
        }

        for _ in 0..ticks {
            self.tick();
        }
        ticks
    }

    /// Run one pass of the main loop
    ///
    /// Every segment whose timer timed out is re-armed and moved once. The
    /// buffer is pushed to the output when the transmit timer times out.
    pub fn poll(&mut self) -> PollOutcome<S> {
        let mut outcome = PollOutcome::default();

        for (index, slot) in self.segments.iter_mut().enumerate() {
            if !self.timers.reload_if_timeout(TimerId(index), slot.period) {
                continue;
            }

            // Both vectors hold S entries, one per segment, so pushes never fail
            let _ = outcome.advanced.push(index);
            if slot.animate(&mut self.leds).is_completed() {
                #[cfg(feature = "esp32-log")]
                println!("[ChaseScheduler.poll] segment {} completed a sweep", index);
                let _ = outcome.completed.push(index);
            }
        }

        if self.timers.reload_if_timeout(TimerId(S), self.transmit_period) {
            self.output.write(&self.leds);
            outcome.transmitted = true;
        }

        outcome
    }

    /// Push the buffer to the output right away
    pub fn transmit_now(&mut self) {
        self.output.write(&self.leds);
    }

    /// Get the current LED buffer
    pub fn leds(&self) -> &[Rgb; LEDS] {
        &self.leds
    }

    /// Get a mutable reference to the LED buffer.
    ///
    /// Useful to lay out a pattern for rotating segments.
    pub fn leds_mut(&mut self) -> &mut [Rgb; LEDS] {
        &mut self.leds
    }

    /// Get a segment by index
    pub fn segment(&self, index: usize) -> &Segment {
        &self.segments[index].segment
    }

    /// Get the timers pacing the segments and the transmit
    pub fn timers(&self) -> &T {
        &self.timers
    }

    /// Get a reference to the output driver.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Get a mutable reference to the output driver.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
