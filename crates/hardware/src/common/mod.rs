//! Common types shared by every part of the wrapper.
//!
//! This module provides:
//! 1. **Constants:** Bus width, default clock and kernel resolution, injection defaults.
//! 2. **Time:** The kernel's cycle/step counter pair and the callback domains they drive.
//! 3. **Signals:** Symbolic ids for the reset and external interrupt input lines.
//! 4. **Errors:** The `BridgeError` enum returned by fallible operations.

/// Wrapper-wide constants.
pub mod constants;

/// Error type.
pub mod error;

/// Input line identifiers.
pub mod signal;

/// Kernel-supplied simulated time.
pub mod time;

pub use constants::BUS_WIDTH_BYTES;
pub use error::BridgeError;
pub use signal::SignalId;
pub use time::{SimTime, TimeDomain};
