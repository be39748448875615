//! Error type shared by the wrapper, its queues and its configuration.
//!
//! The bridge itself never fails on a well-formed request: the host bus is
//! synchronous and infallible. Errors only report malformed stimulus
//! (a strobe the decoder cannot express as one offset/size pair), a
//! callback registered too late under the rejecting policy, or a
//! configuration the wrapper cannot run with.

use thiserror::Error;

use super::time::TimeDomain;

/// Errors reported by the RTL wrapper.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BridgeError {
    /// The byte-enable strobe has a gap between its lowest and highest set bit.
    #[error("byte-enable strobe {strobe:#010b} is not contiguous")]
    NonContiguousStrobe {
        /// Offending mask.
        strobe: u8,
    },

    /// The byte-enable strobe selects lanes the bus does not have.
    #[error("byte-enable strobe {strobe:#010b} selects lanes beyond a {width}-byte bus")]
    StrobeOutOfRange {
        /// Offending mask.
        strobe: u8,
        /// Bus width in bytes.
        width: usize,
    },

    /// A callback was registered for a time that has already been drained.
    #[error("{domain} callback for t={requested} is not after last drained time {last_drained}")]
    CallbackInPast {
        /// Queue the registration targeted.
        domain: TimeDomain,
        /// Requested trigger time.
        requested: u64,
        /// Time of the most recent drain of that queue.
        last_drained: u64,
    },

    /// Clock frequency is zero, negative or not finite.
    #[error("invalid clock rate {0} Hz")]
    InvalidClockRate(f64),

    /// Kernel time resolution is zero, negative or not finite.
    #[error("invalid time resolution {0} s")]
    InvalidTimeResolution(f64),

    /// Bus width outside `1..=8` bytes.
    #[error("unsupported bus width of {0} bytes (expected 1..=8)")]
    UnsupportedBusWidth(usize),
}
