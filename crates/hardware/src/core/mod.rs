//! RTL wrapper core.
//!
//! This module implements the hardware-facing half of the bridge. It provides:
//! 1. **Registers:** Committed state, its pure next-state function and derived outputs.
//! 2. **Sequencer:** `RtlWrapper`, which runs the rising, combinational and falling phases.
//! 3. **Signals:** Reset and interrupt request entry points, clock-rate setting.
//! 4. **Clock:** Conversion from a frequency to kernel resolution ticks.

/// Clock period bookkeeping.
pub mod clock;

/// Register state and transition function.
pub mod regs;

/// Signal entry points on the wrapper.
pub mod signals;

/// Clock-edge sequencer.
pub mod wrapper;

pub use clock::ClockRate;
pub use regs::{RegisterState, SignalInputs, WrapperOutputs};
pub use wrapper::RtlWrapper;
