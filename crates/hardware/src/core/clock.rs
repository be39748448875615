//! Clock period bookkeeping.
//!
//! The kernel measures time in fixed resolution ticks (1 ps by default).
//! Setting a CPU frequency converts the period into a whole number of
//! those ticks, rounded to nearest.

use crate::common::BridgeError;
use crate::common::constants::{DEFAULT_CYCLES_PER_PERIOD, DEFAULT_TIME_RESOLUTION_SECS};

/// CPU clock expressed in kernel resolution ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockRate {
    resolution_secs: f64,
    cycles_per_period: u64,
}

impl ClockRate {
    /// Creates a clock at the given frequency for a kernel with the given resolution.
    pub fn new(hz: f64, resolution_secs: f64) -> Result<Self, BridgeError> {
        if !(resolution_secs.is_finite() && resolution_secs > 0.0) {
            return Err(BridgeError::InvalidTimeResolution(resolution_secs));
        }
        let mut clock = Self {
            resolution_secs,
            cycles_per_period: 0,
        };
        let _ = clock.set_hz(hz)?;
        Ok(clock)
    }

    /// Changes the frequency and returns the new period in kernel ticks.
    pub fn set_hz(&mut self, hz: f64) -> Result<u64, BridgeError> {
        if !(hz.is_finite() && hz > 0.0) {
            return Err(BridgeError::InvalidClockRate(hz));
        }
        self.cycles_per_period = ((1.0 / hz) / self.resolution_secs + 0.5) as u64;
        Ok(self.cycles_per_period)
    }

    /// Clock period in kernel resolution ticks.
    pub const fn cycles_per_period(&self) -> u64 {
        self.cycles_per_period
    }

    /// Kernel time resolution in seconds.
    pub const fn resolution_secs(&self) -> f64 {
        self.resolution_secs
    }
}

impl Default for ClockRate {
    fn default() -> Self {
        Self {
            resolution_secs: DEFAULT_TIME_RESOLUTION_SECS,
            cycles_per_period: DEFAULT_CYCLES_PER_PERIOD,
        }
    }
}
