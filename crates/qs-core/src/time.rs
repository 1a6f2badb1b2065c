//! Simulation time model.
//!
//! # Design
//!
//! Logical time is a monotonically increasing `Tick` counter.  One simulated
//! second is [`TICKS_PER_SECOND`] ticks; rates configured "per second" are
//! divided by that constant to get a per-tick probability.
//!
//! The external driver (a frame callback, a timer, a test loop) is invoked at
//! irregular intervals.  `SimClock` converts each invocation's elapsed delta,
//! scaled by a [`TimeScale`], into a whole number of ticks by carrying the
//! fractional remainder between calls:
//!
//!   carry += delta * scale;  ticks_due = floor(carry);  carry -= ticks_due
//!
//! so the simulation always advances by exact integer steps and a large scale
//! can run several ticks inside one external call ("catch-up").

use std::fmt;

/// Logical ticks per simulated second.
pub const TICKS_PER_SECOND: u32 = 60;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`, saturating at `u64::MAX`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0.saturating_add(n))
    }

    /// Ticks elapsed from `earlier` to `self`, saturating at zero.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Simulated seconds represented by this tick count.
    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / TICKS_PER_SECOND as f64
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        self.offset(rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TimeScale ─────────────────────────────────────────────────────────────────

/// Multiplier applied to every external delta before it reaches the clock.
///
/// Values `<= 0` (or non-finite) pause the clock without stopping the
/// simulation: the driver simply produces zero ticks.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeScale(pub f64);

impl TimeScale {
    pub const REALTIME: TimeScale = TimeScale(1.0);

    /// Bounds of the control slider accepted by [`from_slider`][Self::from_slider].
    pub const SLIDER_MIN: i32 = -100;
    pub const SLIDER_MAX: i32 = 100;

    /// Exponential slider mapping: `10^(s / 50)`, so `-100..=100` covers
    /// 0.01× to 100× with 1× at the centre.  Out-of-range input is clamped.
    pub fn from_slider(position: i32) -> TimeScale {
        let s = position.clamp(Self::SLIDER_MIN, Self::SLIDER_MAX);
        TimeScale(10f64.powf(s as f64 / 50.0))
    }

    /// The effective multiplier; `0.0` when the scale pauses the clock.
    #[inline]
    pub fn factor(self) -> f64 {
        if self.0.is_finite() && self.0 > 0.0 { self.0 } else { 0.0 }
    }

    #[inline]
    pub fn is_paused(self) -> bool {
        self.factor() == 0.0
    }
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::REALTIME
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}x", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The logical clock plus the driver's fractional carry.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// The last fully committed tick.
    pub current_tick: Tick,
    /// Fractional ticks owed to the simulation, always in `[0, 1)`.
    carry: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tick the next `advance()` will commit.
    #[inline]
    pub fn next_tick(&self) -> Tick {
        self.current_tick.offset(1)
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.next_tick();
    }

    /// Add `delta * scale` to the carry and return how many whole ticks are
    /// now due.  The returned ticks are removed from the carry.
    ///
    /// Negative, zero, or non-finite products contribute nothing.
    pub fn accumulate(&mut self, delta: f64, scale: TimeScale) -> u64 {
        let step = delta * scale.factor();
        if !step.is_finite() || step <= 0.0 {
            return 0;
        }
        self.carry += step;
        let whole = self.carry.floor();
        self.carry -= whole;
        whole as u64
    }

    /// Fractional ticks currently carried between driver calls.
    #[inline]
    pub fn carry(&self) -> f64 {
        self.carry
    }

    /// Drop any fractional time carried so far.
    #[inline]
    pub fn discard_carry(&mut self) {
        self.carry = 0.0;
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.as_secs_f64()
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current_tick, self.elapsed_secs())
    }
}
