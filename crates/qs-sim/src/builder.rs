//! Fluent builder for constructing a [`Sim`].

use qs_core::SimConfig;
use qs_metrics::INITIAL_DISPLAY_BOUND;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                         |
/// |-----------------------|---------------------------------|
/// | `.seed(s)`            | `config.seed`                   |
/// | `.display_bound(n)`   | [`INITIAL_DISPLAY_BOUND`] (50)  |
/// | `.running(true)`      | stopped                         |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig { machine_count: 3, ..Default::default() })
///     .seed(7)
///     .running(true)
///     .build()?;
/// sim.advance(1.0);
/// ```
pub struct SimBuilder {
    config:        SimConfig,
    display_bound: usize,
    running:       bool,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, display_bound: INITIAL_DISPLAY_BOUND, running: false }
    }

    /// Override the RNG seed (also used by every later `reset`).
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Starting (and minimum) value of the adaptive queue-meter bound.
    pub fn display_bound(mut self, initial: usize) -> Self {
        self.display_bound = initial;
        self
    }

    /// Start in the running state instead of stopped.
    pub fn running(mut self, running: bool) -> Self {
        self.running = running;
        self
    }

    /// Validate the configuration and return a ready-to-tick [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        if self.display_bound == 0 {
            return Err(SimError::Config("display bound must be positive".into()));
        }
        Ok(Sim::from_parts(self.config, self.display_bound, self.running))
    }
}
