//! Kernel-side edge driver.
//!
//! In a full co-simulation the event kernel owns the clock and the two
//! counters. `EdgeDriver` plays that role for tests and the scenario runner:
//! each call to [`EdgeDriver::tick`] delivers one rising edge, one
//! combinational update and one falling edge to the wrapper, passing the
//! current counters explicitly, and then advances them.

use crate::common::{BridgeError, SimTime};
use crate::core::{RtlWrapper, WrapperOutputs};
use crate::soc::bridge::{BusRequest, BusResponse};
use crate::soc::traits::HostBus;

/// What one simulated cycle produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleReport {
    /// Counters passed to the falling edge.
    pub time: SimTime,
    /// Outputs after this cycle's commit.
    pub outputs: WrapperOutputs,
    /// Response computed by this cycle's falling edge.
    pub response: BusResponse,
}

/// Owns a wrapper and the kernel counters that drive it.
#[derive(Debug)]
pub struct EdgeDriver<B> {
    wrapper: RtlWrapper<B>,
    time: SimTime,
}

impl<B: HostBus> EdgeDriver<B> {
    /// Starts driving `wrapper` from cycle 0, step 0.
    pub fn new(wrapper: RtlWrapper<B>) -> Self {
        Self::starting_at(wrapper, SimTime::default())
    }

    /// Starts driving `wrapper` from the given counters.
    pub fn starting_at(wrapper: RtlWrapper<B>, time: SimTime) -> Self {
        Self { wrapper, time }
    }

    /// Runs one cycle, advancing the step counter by one.
    pub fn tick(&mut self, request: &BusRequest) -> Result<CycleReport, BridgeError> {
        self.tick_with_steps(request, 1)
    }

    /// Runs one cycle, advancing the step counter by `step_delta`.
    ///
    /// The counters advance even when the falling edge reports an error,
    /// since the kernel's clock does not stop for a dropped request.
    pub fn tick_with_steps(
        &mut self,
        request: &BusRequest,
        step_delta: u64,
    ) -> Result<CycleReport, BridgeError> {
        let _ = self.wrapper.on_rising_edge();
        let outputs = self.wrapper.on_combinational_update();
        let time = self.time;
        let result = self.wrapper.on_falling_edge(time, request);
        self.time.cycle += 1;
        self.time.step += step_delta;
        result.map(|response| CycleReport {
            time,
            outputs,
            response,
        })
    }

    /// Runs `cycles` cycles with no bus request.
    pub fn run_idle(&mut self, cycles: u64) -> Result<Vec<CycleReport>, BridgeError> {
        (0..cycles).map(|_| self.tick(&BusRequest::IDLE)).collect()
    }
}

impl<B> EdgeDriver<B> {
    /// Counters that the next falling edge will see.
    pub const fn time(&self) -> SimTime {
        self.time
    }

    /// Driven wrapper.
    pub const fn wrapper(&self) -> &RtlWrapper<B> {
        &self.wrapper
    }

    /// Mutable access to the driven wrapper (signals, registrations, bus).
    pub fn wrapper_mut(&mut self) -> &mut RtlWrapper<B> {
        &mut self.wrapper
    }

    /// Releases the wrapper.
    pub fn into_wrapper(self) -> RtlWrapper<B> {
        self.wrapper
    }
}
