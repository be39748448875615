//! Simulation harness pieces.
//!
//! This module contains what surrounds the wrapper in a run:
//! 1. **Driver:** `EdgeDriver`, a stand-in for the event kernel's clock and counters.
//! 2. **Hooks:** `StepHook` and the `ConsoleInjection` test hook.

/// Kernel-side edge driver.
pub mod driver;

/// Falling-edge test hooks.
pub mod hook;

pub use driver::{CycleReport, EdgeDriver};
pub use hook::{ConsoleInjection, StepHook};
