//! Cooperative countdown timers
//!
//! A [`TimerBank`] is a fixed array of countdown timers addressed by small
//! integer ids. Every call to [`TimerBank::tick_all`] is one timer quantum
//! ([`TICK_DURATION`]). A running timer latches in [`TimerState::Timeout`]
//! when its counter reaches zero and stays there until it is loaded or
//! started again.

mod shared;

use embassy_time::Duration;

pub use shared::SharedTimerBank;

/// Real time covered by one tick
pub const TICK_DURATION: Duration = Duration::from_millis(1);

/// Convert a duration to a tick count, rounding up
pub fn ticks_for(duration: Duration) -> u32 {
    let ticks = duration.as_micros().div_ceil(TICK_DURATION.as_micros());
    u32::try_from(ticks).unwrap_or(u32::MAX)
}

/// Lifecycle state of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    /// Not counting; the counter is kept
    #[default]
    Stopped,
    /// Counting down on every tick
    Running,
    /// Counter reached zero while running
    Timeout,
    /// Reset; the counter is cleared
    Idle,
}

/// Identifier of a timer within a [`TimerBank`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub usize);

impl From<usize> for TimerId {
    fn from(id: usize) -> Self {
        TimerId(id)
    }
}

impl From<u8> for TimerId {
    fn from(id: u8) -> Self {
        TimerId(usize::from(id))
    }
}

impl From<TimerId> for usize {
    fn from(id: TimerId) -> Self {
        id.0
    }
}

/// Single countdown timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timer {
    remaining: u32,
    state: TimerState,
}

impl Timer {
    /// Create a stopped timer with an empty counter
    pub const fn new() -> Self {
        Self {
            remaining: 0,
            state: TimerState::Stopped,
        }
    }

    /// Set the counter and start counting
    pub fn load(&mut self, ticks: u32) {
        self.remaining = ticks;
        self.start();
    }

    /// Count down one tick
    ///
    /// Returns `true` if this tick made the timer time out. A running timer
    /// whose counter is already zero times out on its next tick.
    pub fn tick(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Timeout;
            return true;
        }
        false
    }

    /// Resume counting from the current counter value
    pub fn start(&mut self) {
        self.state = TimerState::Running;
    }

    /// Stop counting, keeping the counter
    pub fn stop(&mut self) {
        self.state = TimerState::Stopped;
    }

    /// Clear the counter and go idle
    pub fn reset(&mut self) {
        self.remaining = 0;
        self.state = TimerState::Idle;
    }

    /// Get the lifecycle state
    pub const fn state(&self) -> TimerState {
        self.state
    }

    /// Get the ticks left before the timeout
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Check if the timer latched a timeout
    pub const fn is_timeout(&self) -> bool {
        matches!(self.state, TimerState::Timeout)
    }
}

/// Fixed-size bank of timers
///
/// Out-of-range ids are a programming error and panic.
#[derive(Debug, Clone)]
pub struct TimerBank<const N: usize> {
    timers: [Timer; N],
}

impl<const N: usize> TimerBank<N> {
    /// Create a bank of stopped timers
    pub const fn new() -> Self {
        Self {
            timers: [Timer::new(); N],
        }
    }

    /// Set the counter of a timer and start it
    pub fn load(&mut self, id: TimerId, ticks: u32) {
        self.timer_mut(id).load(ticks);
    }

    /// Advance every running timer by one tick
    ///
    /// Returns the number of timers that timed out on this tick.
    pub fn tick_all(&mut self) -> usize {
        self.timers
            .iter_mut()
            .map(Timer::tick)
            .filter(|timed_out| *timed_out)
            .count()
    }

    /// Get the state of a timer
    ///
    /// This does not re-arm a timed out timer, callers must load it again.
    pub fn check(&self, id: TimerId) -> TimerState {
        self.timer(id).state()
    }

    /// Resume a timer from its current counter
    pub fn start(&mut self, id: TimerId) {
        self.timer_mut(id).start();
    }

    /// Stop a timer, keeping its counter
    pub fn stop(&mut self, id: TimerId) {
        self.timer_mut(id).stop();
    }

    /// Clear the counter of a timer and make it idle
    pub fn reset(&mut self, id: TimerId) {
        self.timer_mut(id).reset();
    }

    /// Get the remaining ticks of a timer
    pub fn remaining(&self, id: TimerId) -> u32 {
        self.timer(id).remaining()
    }

    /// Get the number of timers in the bank
    pub const fn len(&self) -> usize {
        N
    }

    /// Check if the bank has no timers
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    fn timer(&self, id: TimerId) -> &Timer {
        let index = usize::from(id);
        assert!(index < N, "timer id {} out of range for a bank of {}", index, N);
        &self.timers[index]
    }

    fn timer_mut(&mut self, id: TimerId) -> &mut Timer {
        let index = usize::from(id);
        assert!(index < N, "timer id {} out of range for a bank of {}", index, N);
        &mut self.timers[index]
    }
}

impl<const N: usize> Default for TimerBank<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Timers a [`ChaseScheduler`](crate::ChaseScheduler) paces its work with
///
/// Implemented by an owned [`TimerBank`] and by a reference to a
/// [`SharedTimerBank`], so the ticking side can live in an interrupt handler
/// while the polling loop only loads and checks.
pub trait TimerSource {
    /// Number of addressable timers
    fn capacity(&self) -> usize;

    /// Set the counter of a timer and start it
    fn load(&mut self, id: TimerId, ticks: u32);

    /// Get the state of a timer
    fn check(&self, id: TimerId) -> TimerState;

    /// Advance every running timer by one tick
    fn tick_all(&mut self) -> usize;

    /// Reload a timer if it has timed out
    ///
    /// Returns `true` if the timer had timed out.
    fn reload_if_timeout(&mut self, id: TimerId, ticks: u32) -> bool {
        if self.check(id) == TimerState::Timeout {
            self.load(id, ticks);
            return true;
        }
        false
    }
}

impl<const N: usize> TimerSource for TimerBank<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn load(&mut self, id: TimerId, ticks: u32) {
        TimerBank::load(self, id, ticks);
    }

    fn check(&self, id: TimerId) -> TimerState {
        TimerBank::check(self, id)
    }

    fn tick_all(&mut self) -> usize {
        TimerBank::tick_all(self)
    }
}
