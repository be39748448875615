//! Register file of the wrapper.
//!
//! The wrapper keeps one committed `RegisterState`. The next value is never
//! built by mutating the committed one in place: [`RegisterState::next`] is a
//! pure function of the committed state, the sampled input lines and the
//! response produced by the last falling edge, and the sequencer replaces the
//! committed state with its result on each rising edge.

use crate::common::constants::RESET_SHIFT_MASK;
use crate::soc::bridge::BusResponse;

/// Input lines sampled at the rising edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignalInputs {
    /// Reset request driven by the controller.
    pub reset_request: bool,
    /// External interrupt request driven by the controller.
    pub interrupt_request: bool,
}

/// Committed register values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegisterState {
    /// Two most recent reset-request samples; bit 1 is the older one.
    pub reset_shift: u8,
    /// Interrupt request as sampled at the last commit.
    pub interrupt: bool,
    /// Data returned by the last bus transaction.
    pub resp_data: u64,
    /// Set for the single cycle following an accepted request.
    pub resp_valid: bool,
}

impl RegisterState {
    /// Computes the value committed at the next rising edge.
    pub fn next(&self, inputs: &SignalInputs, response: BusResponse) -> Self {
        Self {
            reset_shift: ((self.reset_shift << 1) | u8::from(inputs.reset_request))
                & RESET_SHIFT_MASK,
            interrupt: inputs.interrupt_request,
            resp_data: response.data,
            resp_valid: response.valid,
        }
    }

    /// Derives the externally visible lines from the committed state.
    ///
    /// Reset is reported only once both synchronizer samples are high, so a
    /// request that lasts a single cycle is filtered out.
    pub fn outputs(&self) -> WrapperOutputs {
        WrapperOutputs {
            reset: self.reset_shift & RESET_SHIFT_MASK == RESET_SHIFT_MASK,
            interrupt: self.interrupt,
            resp_valid: self.resp_valid,
            resp_data: self.resp_data,
        }
    }
}

/// Lines driven into the CPU core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WrapperOutputs {
    /// Synchronized reset line.
    pub reset: bool,
    /// Latched external interrupt.
    pub interrupt: bool,
    /// Memory response strobe.
    pub resp_valid: bool,
    /// Memory response payload.
    pub resp_data: u64,
}
