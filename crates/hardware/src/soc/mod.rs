//! Software side of the wrapper.
//!
//! This module contains what the RTL model talks to through the wrapper. It provides:
//! 1. **Traits:** `HostBus` and `Console`, implemented by the host simulator.
//! 2. **Bridge:** Strobe decoding and the one-call-per-step request translator.
//! 3. **Memory:** `Ram`, a plain memory host bus.
//! 4. **Console:** `CaptureConsole`, a byte sink for the injection hook.

/// Bus request decoding and dispatch.
pub mod bridge;

/// Capturing console.
pub mod console;

/// Plain memory host bus.
pub mod memory;

/// Host collaborator traits.
pub mod traits;

pub use bridge::{BusBridge, BusRequest, BusResponse, StrobeDecode, decode_strobe};
pub use console::CaptureConsole;
pub use memory::Ram;
pub use traits::{Console, HostBus};
