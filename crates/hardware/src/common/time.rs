//! Simulated time as supplied by the external kernel.

use std::fmt;

/// The two independent counters the kernel exposes at every falling edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SimTime {
    /// Coarse clock-cycle counter.
    pub cycle: u64,
    /// Fine step counter (debug stepping granularity).
    pub step: u64,
}

impl SimTime {
    /// Creates a time stamp from explicit counter values.
    pub const fn new(cycle: u64, step: u64) -> Self {
        Self { cycle, step }
    }

    /// Returns the counter that drives the given callback domain.
    pub const fn get(&self, domain: TimeDomain) -> u64 {
        match domain {
            TimeDomain::Clock => self.cycle,
            TimeDomain::Step => self.step,
        }
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cycle={} step={}", self.cycle, self.step)
    }
}

/// Selects which counter a callback queue is ordered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeDomain {
    /// Clock-cycle counter.
    Clock,
    /// Fine step counter.
    Step,
}

impl fmt::Display for TimeDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clock => write!(f, "clock"),
            Self::Step => write!(f, "step"),
        }
    }
}
