//! RTL CPU wrapper library.
//!
//! This crate connects a cycle-accurate CPU model running inside an event-driven
//! simulation kernel to a host-side memory bus and debug-event framework:
//! 1. **Core:** Register file, clock-edge sequencing, reset/interrupt signal handling.
//! 2. **Scheduling:** Exactly-once, time-ordered listener callbacks on the clock and step counters.
//! 3. **SoC:** Byte-enable decoding and one host bus call per step; RAM and console helpers.
//! 4. **Simulation:** A kernel-style edge driver and falling-edge test hooks.
//! 5. **Support:** Configuration, errors and activity statistics.

/// Common types and constants (time, signals, errors).
pub mod common;
/// Wrapper configuration (bus width, clock, callback policy, console hook).
pub mod config;
/// Register file, edge sequencer and signal entry points.
pub mod core;
/// Callback queues and listener traits.
pub mod sched;
/// Edge driver and test hooks.
pub mod sim;
/// Host bus traits, bus bridge, RAM and console.
pub mod soc;
/// Activity counters.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Wrapper type; construct with `RtlWrapper::new`.
pub use crate::core::RtlWrapper;
/// Error type returned by fallible operations.
pub use crate::common::BridgeError;
