//! Clock-edge sequencer.
//!
//! `RtlWrapper` is driven by three kernel events per cycle, always in this order:
//! 1. **Rising edge:** the next register value is computed from the committed one and
//!    replaces it in a single assignment.
//! 2. **Combinational update:** the output lines are recomputed from the committed state.
//! 3. **Falling edge:** both callback queues are drained up to the counters passed in,
//!    the optional test hook runs, then the pending bus request is served.
//!
//! The response produced by a falling edge is held until the next rising edge
//! commits it, so the CPU sees `resp_valid` for exactly one cycle per request.

use std::fmt;

use tracing::{trace, warn};

use super::clock::ClockRate;
use super::regs::{RegisterState, SignalInputs, WrapperOutputs};
use crate::common::{BridgeError, SimTime, TimeDomain};
use crate::config::Config;
use crate::sched::{Callbacks, ListenerHandle, Scheduler};
use crate::sim::hook::StepHook;
use crate::soc::bridge::{BusBridge, BusRequest, BusResponse, decode_strobe};
use crate::soc::traits::HostBus;
use crate::stats::BridgeStats;

/// Wrapper around the RTL CPU model, owning the host bus it forwards requests to.
pub struct RtlWrapper<B> {
    /// Committed register state.
    r: RegisterState,
    /// Response waiting for the next commit.
    pending: BusResponse,
    /// Input lines as last driven by the controller.
    pub(super) inputs: SignalInputs,
    /// Outputs from the last combinational update.
    outputs: WrapperOutputs,
    pub(super) clock: ClockRate,
    bridge: BusBridge,
    bus: B,
    callbacks: Callbacks,
    hook: Option<Box<dyn StepHook>>,
    stats: BridgeStats,
}

impl<B: HostBus> RtlWrapper<B> {
    /// Builds a wrapper in its power-on state.
    ///
    /// # Arguments
    ///
    /// * `config` - Bus width, clock and callback policy; validated first.
    /// * `bus` - Host bus that serves memory requests.
    pub fn new(config: &Config, bus: B) -> Result<Self, BridgeError> {
        config.validate()?;
        Ok(Self {
            r: RegisterState::default(),
            pending: BusResponse::IDLE,
            inputs: SignalInputs::default(),
            outputs: WrapperOutputs::default(),
            clock: ClockRate::new(config.clock.hz, config.clock.time_resolution_secs)?,
            bridge: BusBridge::new(config.bus.width_bytes)?,
            bus,
            callbacks: Callbacks::new(config.callbacks.late_policy),
            hook: None,
            stats: BridgeStats::default(),
        })
    }

    /// Installs a falling-edge hook, replacing any previous one.
    pub fn with_hook(mut self, hook: impl StepHook + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Installs or removes the falling-edge hook.
    pub fn set_hook(&mut self, hook: Option<Box<dyn StepHook>>) {
        self.hook = hook;
    }

    /// Rising edge: commits the next register value and returns it.
    pub fn on_rising_edge(&mut self) -> RegisterState {
        self.r = self.r.next(&self.inputs, self.pending);
        self.r
    }

    /// Recomputes the output lines from the committed state.
    pub fn on_combinational_update(&mut self) -> WrapperOutputs {
        let outputs = self.r.outputs();
        if outputs != self.outputs {
            trace!(?outputs, "outputs changed");
            self.outputs = outputs;
        }
        outputs
    }

    /// Falling edge: drains both callback queues, runs the hook, serves `request`.
    ///
    /// The response is returned and also held for the next rising edge. A request
    /// whose strobe cannot be decoded leaves the response idle for this step and
    /// reports the decode error; the bus is not touched in that case.
    pub fn on_falling_edge(
        &mut self,
        time: SimTime,
        request: &BusRequest,
    ) -> Result<BusResponse, BridgeError> {
        self.stats.cycles += 1;
        self.stats.clock_callbacks += self.callbacks.drain(TimeDomain::Clock, time.cycle) as u64;
        self.stats.step_callbacks += self.callbacks.drain(TimeDomain::Step, time.step) as u64;

        if let Some(hook) = self.hook.as_mut() {
            hook.on_falling_edge(time);
        }

        self.pending = BusResponse::IDLE;
        match self.bridge.process(request, &mut self.bus) {
            Ok(response) => {
                self.record(request);
                self.pending = response;
                Ok(response)
            }
            Err(err) => {
                warn!(%time, address = request.address, %err, "dropping bus request");
                self.stats.decode_errors += 1;
                Err(err)
            }
        }
    }

    fn record(&mut self, request: &BusRequest) {
        if !request.valid {
            self.stats.idle_steps += 1;
        } else if request.write {
            let size = decode_strobe(request.strobe, self.bridge.width()).map_or(0, |d| d.size);
            self.stats.writes += 1;
            self.stats.bytes_written += size as u64;
            if size == 0 {
                self.stats.zero_length_writes += 1;
            }
        } else {
            self.stats.reads += 1;
            self.stats.bytes_read += self.bridge.width() as u64;
        }
    }
}

impl<B> RtlWrapper<B> {
    /// Output lines as of the last combinational update.
    pub const fn outputs(&self) -> WrapperOutputs {
        self.outputs
    }

    /// Committed register state.
    pub const fn registers(&self) -> RegisterState {
        self.r
    }

    /// Response that the next rising edge will commit.
    pub const fn pending_response(&self) -> BusResponse {
        self.pending
    }

    /// Bus width in bytes.
    pub const fn bus_width(&self) -> usize {
        self.bridge.width()
    }

    /// Host bus.
    pub const fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutable host bus, e.g. for preloading memory between cycles.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Consumes the wrapper and returns its host bus.
    pub fn into_bus(self) -> B {
        self.bus
    }

    /// Both callback queues.
    pub const fn callbacks(&self) -> &Callbacks {
        &self.callbacks
    }

    /// Activity counters.
    pub const fn stats(&self) -> &BridgeStats {
        &self.stats
    }
}

impl<B> Scheduler for RtlWrapper<B> {
    fn register_clock_callback(
        &mut self,
        listener: ListenerHandle,
        trigger_cycle: u64,
    ) -> Result<(), BridgeError> {
        self.callbacks.register_clock_callback(listener, trigger_cycle)
    }

    fn register_step_callback(
        &mut self,
        listener: ListenerHandle,
        trigger_step: u64,
    ) -> Result<(), BridgeError> {
        self.callbacks.register_step_callback(listener, trigger_step)
    }
}

impl<B> fmt::Debug for RtlWrapper<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RtlWrapper")
            .field("r", &self.r)
            .field("pending", &self.pending)
            .field("inputs", &self.inputs)
            .field("clock", &self.clock)
            .field("bridge", &self.bridge)
            .field("callbacks", &self.callbacks)
            .field("has_hook", &self.hook.is_some())
            .finish_non_exhaustive()
    }
}
