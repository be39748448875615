//! Configuration for the RTL wrapper.
//!
//! This module defines the structures used to parameterize the wrapper. It provides:
//! 1. **Bus:** Transfer width of the host bus.
//! 2. **Clock:** CPU frequency and the kernel's time resolution.
//! 3. **Callbacks:** Policy for registrations at or before the last drained time.
//! 4. **Console:** Optional test-injection hook settings.
//!
//! Every field has a default, so `Config::default()` and `{}` in JSON describe the same wrapper.

use serde::Deserialize;

use crate::common::BridgeError;
use crate::common::constants::{
    DEFAULT_CLOCK_HZ, DEFAULT_INJECT_PAYLOAD, DEFAULT_INJECT_STEP, DEFAULT_TIME_RESOLUTION_SECS,
    BUS_WIDTH_BYTES, MAX_BUS_WIDTH_BYTES,
};

/// Root configuration.
///
/// # Examples
///
/// ```
/// use rtlbridge_core::config::{Config, LateCallbackPolicy};
///
/// let json = r#"{
///     "bus": { "width_bytes": 4 },
///     "clock": { "hz": 50000000.0 },
///     "callbacks": { "late_policy": "reject" }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.bus.width_bytes, 4);
/// assert_eq!(config.callbacks.late_policy, LateCallbackPolicy::Reject);
/// assert!(config.console.is_none());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Host bus parameters
    #[serde(default)]
    pub bus: BusConfig,
    /// Clock frequency and kernel resolution
    #[serde(default)]
    pub clock: ClockConfig,
    /// Callback queue behaviour
    #[serde(default)]
    pub callbacks: CallbackConfig,
    /// Console injection hook; absent means no hook is installed
    #[serde(default)]
    pub console: Option<ConsoleInjectionConfig>,
}

impl Config {
    /// Checks that the wrapper can be built from this configuration.
    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.bus.width_bytes == 0 || self.bus.width_bytes > MAX_BUS_WIDTH_BYTES {
            return Err(BridgeError::UnsupportedBusWidth(self.bus.width_bytes));
        }
        if !(self.clock.hz.is_finite() && self.clock.hz > 0.0) {
            return Err(BridgeError::InvalidClockRate(self.clock.hz));
        }
        let res = self.clock.time_resolution_secs;
        if !(res.is_finite() && res > 0.0) {
            return Err(BridgeError::InvalidTimeResolution(res));
        }
        Ok(())
    }
}

/// Host bus parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct BusConfig {
    /// Bytes moved by a full-width transfer (one strobe bit per byte lane)
    #[serde(default = "BusConfig::default_width_bytes")]
    pub width_bytes: usize,
}

impl BusConfig {
    fn default_width_bytes() -> usize {
        BUS_WIDTH_BYTES
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            width_bytes: BUS_WIDTH_BYTES,
        }
    }
}

/// Clock frequency and kernel time resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockConfig {
    /// CPU clock frequency in Hz
    #[serde(default = "ClockConfig::default_hz")]
    pub hz: f64,
    /// Kernel time resolution in seconds (1 ps by default)
    #[serde(default = "ClockConfig::default_time_resolution_secs")]
    pub time_resolution_secs: f64,
}

impl ClockConfig {
    fn default_hz() -> f64 {
        DEFAULT_CLOCK_HZ
    }

    fn default_time_resolution_secs() -> f64 {
        DEFAULT_TIME_RESOLUTION_SECS
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            hz: DEFAULT_CLOCK_HZ,
            time_resolution_secs: DEFAULT_TIME_RESOLUTION_SECS,
        }
    }
}

/// What a queue does with a registration whose trigger time is not after the last drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LateCallbackPolicy {
    /// Accept it and deliver on the next drain cycle.
    #[default]
    DeliverNextDrain,
    /// Refuse it with [`BridgeError::CallbackInPast`].
    Reject,
}

/// Callback queue behaviour.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackConfig {
    /// Policy applied to both the clock and the step queue
    #[serde(default)]
    pub late_policy: LateCallbackPolicy,
}

/// Console injection hook settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleInjectionConfig {
    /// Step count at which the payload is written
    #[serde(default = "ConsoleInjectionConfig::default_step")]
    pub step: u64,
    /// Text written to the console
    #[serde(default = "ConsoleInjectionConfig::default_payload")]
    pub payload: String,
}

impl ConsoleInjectionConfig {
    fn default_step() -> u64 {
        DEFAULT_INJECT_STEP
    }

    fn default_payload() -> String {
        DEFAULT_INJECT_PAYLOAD.to_string()
    }
}

impl Default for ConsoleInjectionConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_INJECT_STEP,
            payload: DEFAULT_INJECT_PAYLOAD.to_string(),
        }
    }
}
