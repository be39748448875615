//! Fixed parameters of the wrapper and the kernel it is embedded in.

/// Width in bytes of a full (non-strobed) bus transfer on the default 64-bit bus.
pub const BUS_WIDTH_BYTES: usize = 8;

/// Widest bus the bridge can carry; response data is held in a `u64`.
pub const MAX_BUS_WIDTH_BYTES: usize = 8;

/// Default kernel time resolution (1 ps).
pub const DEFAULT_TIME_RESOLUTION_SECS: f64 = 1e-12;

/// Default CPU clock frequency (1 MHz).
pub const DEFAULT_CLOCK_HZ: f64 = 1_000_000.0;

/// Kernel ticks per clock period at the default frequency and resolution.
pub const DEFAULT_CYCLES_PER_PERIOD: u64 = 1_000_000;

/// Mask of the two-sample reset synchronizer.
pub const RESET_SHIFT_MASK: u8 = 0b11;

/// Step at which the console injection hook fires unless configured otherwise.
pub const DEFAULT_INJECT_STEP: u64 = 6000 - 3;

/// Bytes typed into the console by the injection hook unless configured otherwise.
pub const DEFAULT_INJECT_PAYLOAD: &str = "dhry\r\n";
