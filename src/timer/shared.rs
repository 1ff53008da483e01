//! Timer bank shared with an interrupt handler.
//!
//! The periodic tick usually comes from a hardware timer interrupt while the
//! polling loop loads and checks timers. Every access goes through a
//! critical section, so both sides can hold a `&'static` reference.

use core::cell::RefCell;

use critical_section::Mutex;

use super::{TimerBank, TimerId, TimerSource, TimerState};

/// A [`TimerBank`] behind a critical-section mutex
///
/// ```ignore
/// static TIMERS: SharedTimerBank<4> = SharedTimerBank::new();
///
/// #[interrupt]
/// fn SYSTICK() {
///     TIMERS.tick_all();
/// }
/// ```
pub struct SharedTimerBank<const N: usize> {
    inner: Mutex<RefCell<TimerBank<N>>>,
}

impl<const N: usize> SharedTimerBank<N> {
    /// Create a bank of stopped timers
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(TimerBank::new())),
        }
    }

    /// Run `f` with exclusive access to the bank
    pub fn with<R>(&self, f: impl FnOnce(&mut TimerBank<N>) -> R) -> R {
        critical_section::with(|cs| {
            let mut bank = self.inner.borrow(cs).borrow_mut();
            f(&mut *bank)
        })
    }

    /// Advance every running timer by one tick
    pub fn tick_all(&self) -> usize {
        self.with(TimerBank::<N>::tick_all)
    }

    /// Set the counter of a timer and start it
    pub fn load(&self, id: TimerId, ticks: u32) {
        self.with(|bank| bank.load(id, ticks));
    }

    /// Get the state of a timer
    pub fn check(&self, id: TimerId) -> TimerState {
        self.with(|bank| bank.check(id))
    }

    /// Reload a timer if it has timed out
    ///
    /// Returns `true` if the timer had timed out. Check and reload happen in
    /// one critical section, so no tick can slip in between.
    pub fn reload_if_timeout(&self, id: TimerId, ticks: u32) -> bool {
        self.with(|bank| {
            if bank.check(id) == TimerState::Timeout {
                bank.load(id, ticks);
                return true;
            }
            false
        })
    }
}

impl<const N: usize> Default for SharedTimerBank<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TimerSource for &SharedTimerBank<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn load(&mut self, id: TimerId, ticks: u32) {
        SharedTimerBank::load(*self, id, ticks);
    }

    fn check(&self, id: TimerId) -> TimerState {
        SharedTimerBank::check(*self, id)
    }

    fn tick_all(&mut self) -> usize {
        SharedTimerBank::tick_all(*self)
    }

    fn reload_if_timeout(&mut self, id: TimerId, ticks: u32) -> bool {
        SharedTimerBank::reload_if_timeout(*self, id, ticks)
    }
}
