//! External stimulus entry points.
//!
//! Controllers drive the reset and interrupt request lines by raw id, the way
//! the debugger's CPU-signal interface numbers them. Ids other than
//! [`SignalId::RESET`] and [`SignalId::EXTERNAL_IRQ`] are ignored.

use tracing::trace;

use super::clock::ClockRate;
use super::regs::SignalInputs;
use super::wrapper::RtlWrapper;
use crate::common::{BridgeError, SignalId};

impl<B> RtlWrapper<B> {
    /// Drives the line identified by `id` high; unknown ids are a no-op.
    pub fn raise_signal(&mut self, id: u32) {
        self.drive_raw(id, true);
    }

    /// Drives the line identified by `id` low; unknown ids are a no-op.
    pub fn lower_signal(&mut self, id: u32) {
        self.drive_raw(id, false);
    }

    /// Drives a known line to `level`.
    pub fn set_signal(&mut self, signal: SignalId, level: bool) {
        match signal {
            SignalId::Reset => self.inputs.reset_request = level,
            SignalId::ExternalIrq => self.inputs.interrupt_request = level,
        }
    }

    fn drive_raw(&mut self, id: u32, level: bool) {
        match SignalId::from_raw(id) {
            Some(signal) => self.set_signal(signal, level),
            None => trace!(id, level, "ignoring unknown signal id"),
        }
    }

    /// Current input line levels.
    pub const fn inputs(&self) -> SignalInputs {
        self.inputs
    }

    /// Sets the CPU clock frequency and returns the period in kernel ticks.
    pub fn set_clock_hz(&mut self, hz: f64) -> Result<u64, BridgeError> {
        self.clock.set_hz(hz)
    }

    /// Current clock period bookkeeping.
    pub const fn clock(&self) -> &ClockRate {
        &self.clock
    }
}
