//! Wrapper activity counters.
//!
//! This module tracks what the wrapper did over a run. It provides:
//! 1. **Cycles:** Falling edges processed and how many of them carried no request.
//! 2. **Bus traffic:** Reads, writes, bytes moved, empty writes and rejected strobes.
//! 3. **Callbacks:** Listener notifications delivered per time domain.

use std::fmt;

/// Counters accumulated by the wrapper.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BridgeStats {
    /// Falling edges processed.
    pub cycles: u64,
    /// Falling edges without a valid request.
    pub idle_steps: u64,
    /// Full-width reads issued to the host bus.
    pub reads: u64,
    /// Writes issued to the host bus (zero-length ones included).
    pub writes: u64,
    /// Bytes returned by reads.
    pub bytes_read: u64,
    /// Bytes stored by writes.
    pub bytes_written: u64,
    /// Writes whose strobe was empty.
    pub zero_length_writes: u64,
    /// Requests dropped because their strobe could not be decoded.
    pub decode_errors: u64,
    /// Clock-queue notifications delivered.
    pub clock_callbacks: u64,
    /// Step-queue notifications delivered.
    pub step_callbacks: u64,
}

impl BridgeStats {
    /// Fraction of processed steps that carried a request.
    pub fn bus_utilization(&self) -> f64 {
        if self.cycles == 0 {
            return 0.0;
        }
        (self.cycles - self.idle_steps) as f64 / self.cycles as f64
    }
}

impl fmt::Display for BridgeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "RTL WRAPPER STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "idle_steps               {}", self.idle_steps)?;
        writeln!(
            f,
            "bus_utilization          {:.2}%",
            self.bus_utilization() * 100.0
        )?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "bus.reads                {}", self.reads)?;
        writeln!(f, "bus.writes               {}", self.writes)?;
        writeln!(f, "bus.bytes_read           {}", self.bytes_read)?;
        writeln!(f, "bus.bytes_written        {}", self.bytes_written)?;
        writeln!(f, "bus.zero_length_writes   {}", self.zero_length_writes)?;
        writeln!(f, "bus.decode_errors        {}", self.decode_errors)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "callbacks.clock          {}", self.clock_callbacks)?;
        write!(f, "callbacks.step           {}", self.step_callbacks)
    }
}
