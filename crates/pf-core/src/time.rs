//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter. The
//! mapping to wall-clock time is held in `SimClock`:
//!
//!   wall_time = start_unix_ms + tick * tick_duration_ms
//!
//! Using an integer tick as the canonical time unit means all schedule
//! arithmetic is exact (no floating-point drift) and comparisons are O(1).
//! There are no real-world sleeps anywhere in the engine: every deadline
//! (path replan, lane hysteresis window, break duration) is a `Tick`
//! computed ahead of time and compared against `SimClock::current_tick`.
//!
//! `tick_duration_ms` is derived from the configured tick frequency
//! (`1000 / frequency_hz`), typically 100 ms at the default 10 Hz.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and Unix wall-clock milliseconds.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Unix timestamp (milliseconds since epoch) of tick 0.
    pub start_unix_ms: i64,
    /// How many real milliseconds one tick represents.
    pub tick_duration_ms: u32,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock starting at `start_unix_ms` with the given resolution.
    pub fn new(start_unix_ms: i64, tick_duration_ms: u32) -> Self {
        Self {
            start_unix_ms,
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Build a clock from a tick frequency in Hz (the `frequency_hz` config key).
    pub fn from_frequency(start_unix_ms: i64, frequency_hz: u32) -> Self {
        let tick_duration_ms = (1000 / frequency_hz.max(1)).max(1);
        Self::new(start_unix_ms, tick_duration_ms)
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated milliseconds since tick 0.
    #[inline]
    pub fn elapsed_ms(&self) -> i64 {
        self.current_tick.0 as i64 * self.tick_duration_ms as i64
    }

    /// Current Unix timestamp (ms) corresponding to `current_tick`.
    #[inline]
    pub fn current_unix_ms(&self) -> i64 {
        self.start_unix_ms + self.elapsed_ms()
    }

    /// Break elapsed time into (hour, minute, second) components from sim start.
    /// Useful for human-readable logging without a datetime library.
    pub fn elapsed_hms(&self) -> (u32, u32, u32) {
        let total_secs = (self.elapsed_ms().max(0) / 1000) as u64;
        let hours = (total_secs / 3_600) as u32;
        let minutes = ((total_secs % 3_600) / 60) as u32;
        let seconds = (total_secs % 60) as u32;
        (hours, minutes, seconds)
    }

    // ── Tick-count helpers ────────────────────────────────────────────────

    /// How many ticks span `secs` seconds? (rounds up)
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        let ms = (secs * 1000.0).ceil() as u64;
        ms.div_ceil(self.tick_duration_ms as u64)
    }

    #[inline]
    pub fn ticks_for_minutes(&self, minutes: f32) -> u64 {
        self.ticks_for_secs(minutes * 60.0)
    }

    /// Simulated seconds represented by one tick (`1 / frequency_hz`).
    #[inline]
    pub fn tick_duration_secs(&self) -> f32 {
        self.tick_duration_ms as f32 / 1000.0
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = self.elapsed_hms();
        write!(f, "{} ({:02}:{:02}:{:02})", self.current_tick, h, m, s)
    }
}
