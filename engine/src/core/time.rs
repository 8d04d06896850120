//! Time management for the simulation
//!
//! The engine operates in discrete ticks. Multiple ticks form one in-game day.
//! Every timestamp in the system (events, decisions, purchases) is a tick, and
//! the psychological models that reason in days (30-day decision windows,
//! 14-day event retention, luxury lifespans) convert through this clock.

use serde::{Deserialize, Serialize};

/// Manages simulation time in discrete ticks and days
///
/// # Example
/// ```
/// use psychsim_core_rs::TimeManager;
///
/// let mut time = TimeManager::new(24); // 24 ticks per in-game day
/// assert_eq!(time.current_day(), 0);
///
/// for _ in 0..24 {
///     time.advance_tick();
/// }
/// assert_eq!(time.current_day(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeManager {
    /// Total ticks elapsed since simulation start
    current_tick: usize,
    /// Number of ticks in one in-game day
    ticks_per_day: usize,
}

impl TimeManager {
    /// Create a new TimeManager with `ticks_per_day` ticks per in-game day.
    ///
    /// # Panics
    /// Panics if `ticks_per_day` is zero.
    pub fn new(ticks_per_day: usize) -> Self {
        assert!(ticks_per_day > 0, "ticks_per_day must be positive");
        Self {
            current_tick: 0,
            ticks_per_day,
        }
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Get the current tick (total ticks since start)
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Get the current day (0-indexed)
    pub fn current_day(&self) -> usize {
        self.current_tick / self.ticks_per_day
    }

    /// Get the tick within the current day (0-indexed)
    pub fn tick_within_day(&self) -> usize {
        self.current_tick % self.ticks_per_day
    }

    /// Check if the current tick is the last tick of the day
    pub fn is_end_of_day(&self) -> bool {
        self.tick_within_day() == self.ticks_per_day - 1
    }

    /// Get ticks per day
    pub fn ticks_per_day(&self) -> usize {
        self.ticks_per_day
    }

    /// Day bucket a given tick falls into.
    pub fn day_of_tick(&self, tick: usize) -> usize {
        tick / self.ticks_per_day
    }

    /// Whole and fractional days elapsed since `tick`.
    ///
    /// Returns 0.0 for ticks in the future (clock skew from callers that
    /// recorded a timestamp ahead of the engine clock).
    pub fn days_since(&self, tick: usize) -> f64 {
        if tick >= self.current_tick {
            return 0.0;
        }
        (self.current_tick - tick) as f64 / self.ticks_per_day as f64
    }

    /// True when `tick` lies within the trailing `days`-day window ending now.
    pub fn within_days(&self, tick: usize, days: usize) -> bool {
        let window = days * self.ticks_per_day;
        tick + window >= self.current_tick
    }
}
