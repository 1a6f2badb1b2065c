//! `DisplayScaler`: adaptive "maximum expected queue length" for meters.
//!
//! # Hysteresis
//!
//! A bursty queue would make a naive auto-scaled meter jump every frame.
//! The bound therefore only moves when the recent window agrees with the
//! current sample:
//!
//! - **grow** (double) when the current length exceeds the bound and at
//!   least 80% of the window exceeds it too;
//! - **shrink** (halve) when the current length is under half the bound, at
//!   least 80% of the window is under a quarter of it, and the bound is
//!   still above its initial value.
//!
//! "80% of the window" is measured against the window's capacity, not its
//! fill level, so a freshly reset history cannot trigger a change on its
//! first sample.  The two conditions are mutually exclusive, and at most one
//! adjustment happens per tick.  The bound never drops below
//! [`INITIAL_DISPLAY_BOUND`].

use tracing::debug;

use crate::BoundedHistory;

/// Starting value of the display bound.
pub const INITIAL_DISPLAY_BOUND: usize = 50;

/// Samples out of `window.capacity()` that must agree: `ceil(0.8 * cap)`.
fn agreement(capacity: usize) -> usize {
    (capacity * 4).div_ceil(5)
}

/// A change made by [`DisplayScaler::update`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScaleChange {
    Grew { from: usize, to: usize },
    Shrank { from: usize, to: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayScaler {
    bound:   usize,
    initial: usize,
}

impl DisplayScaler {
    pub fn new(initial: usize) -> Self {
        let initial = initial.max(1);
        Self { bound: initial, initial }
    }

    /// The current bound used to normalise queue displays.
    #[inline]
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Re-evaluate the bound against the current queue length and the recent
    /// queue-length `window` (which should already contain `current`).
    pub fn update(&mut self, current: usize, window: &BoundedHistory<usize>) -> Option<ScaleChange> {
        let needed = agreement(window.capacity());
        let bound = self.bound;

        let change = if current > bound && window.count_where(|&s| s > bound) >= needed {
            self.bound = bound.saturating_mul(2);
            ScaleChange::Grew { from: bound, to: self.bound }
        } else if current * 2 < bound
            && window.count_where(|&s| s * 4 < bound) >= needed
            && bound > self.initial
        {
            self.bound = (bound / 2).max(self.initial);
            ScaleChange::Shrank { from: bound, to: self.bound }
        } else {
            return None;
        };

        debug!(?change, current, "display bound adjusted");
        Some(change)
    }
}

impl Default for DisplayScaler {
    fn default() -> Self {
        Self::new(INITIAL_DISPLAY_BOUND)
    }
}
