//! Scenario files for the runner.
//!
//! A scenario is a JSON document with:
//! 1. **config:** The wrapper configuration (every field optional).
//! 2. **memory:** Size, base address and optional preload of the RAM behind the bus.
//! 3. **cycles:** Stimulus blocks, each applying signal changes and then
//!    presenting one request for `repeat` cycles.
//!
//! ```json
//! {
//!   "memory": { "base": 0, "size": 4096 },
//!   "cycles": [
//!     { "raise": ["RESET"], "repeat": 2 },
//!     { "lower": ["RESET"] },
//!     { "request": { "write": { "address": 256, "data": 4660, "strobe": 15 } } },
//!     { "request": { "read": { "address": 256 } }, "repeat": 2 }
//!   ]
//! }
//! ```

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use rtlbridge_core::common::{BridgeError, SignalId};
use rtlbridge_core::config::Config;
use rtlbridge_core::core::{RtlWrapper, WrapperOutputs};
use rtlbridge_core::sim::{ConsoleInjection, CycleReport, EdgeDriver};
use rtlbridge_core::soc::{BusRequest, CaptureConsole, Ram};
use rtlbridge_core::stats::BridgeStats;

/// Errors raised while loading or running a scenario.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The scenario file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The scenario file is not valid scenario JSON.
    #[error("invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),

    /// The wrapper rejected the configuration.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// A signal name is not one the wrapper knows.
    #[error("{0}")]
    Signal(String),
}

/// Whole scenario document.
#[derive(Debug, Default, Deserialize)]
pub struct Scenario {
    /// Wrapper configuration.
    #[serde(default)]
    pub config: Config,
    /// RAM behind the bus.
    #[serde(default)]
    pub memory: MemorySection,
    /// Stimulus blocks, applied in order.
    #[serde(default)]
    pub cycles: Vec<StimulusBlock>,
}

/// RAM window and initial contents.
#[derive(Debug, Deserialize)]
pub struct MemorySection {
    /// First mapped address.
    #[serde(default)]
    pub base: u64,
    /// Window size in bytes.
    #[serde(default = "MemorySection::default_size")]
    pub size: usize,
    /// Byte runs copied in before the first cycle.
    #[serde(default)]
    pub preload: Vec<Preload>,
}

impl MemorySection {
    fn default_size() -> usize {
        0x1_0000
    }
}

impl Default for MemorySection {
    fn default() -> Self {
        Self {
            base: 0,
            size: Self::default_size(),
            preload: Vec::new(),
        }
    }
}

/// Bytes placed at an offset from the RAM base.
#[derive(Debug, Deserialize)]
pub struct Preload {
    /// Offset from the base address.
    pub offset: usize,
    /// Contents.
    pub bytes: Vec<u8>,
}

/// One stimulus block.
#[derive(Debug, Deserialize)]
pub struct StimulusBlock {
    /// Lines driven high before the block's first cycle.
    #[serde(default)]
    pub raise: Vec<SignalRef>,
    /// Lines driven low before the block's first cycle.
    #[serde(default)]
    pub lower: Vec<SignalRef>,
    /// Request presented on every cycle of the block; idle when absent.
    #[serde(default)]
    pub request: Option<RequestKind>,
    /// Number of cycles the block lasts.
    #[serde(default = "StimulusBlock::default_repeat")]
    pub repeat: u64,
    /// Step counter advance per cycle.
    #[serde(default = "StimulusBlock::default_steps")]
    pub steps: u64,
}

impl StimulusBlock {
    fn default_repeat() -> u64 {
        1
    }

    fn default_steps() -> u64 {
        1
    }
}

/// Signal given either by name or by raw controller id.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum SignalRef {
    /// Raw id; ids the wrapper does not know are passed through and ignored by it.
    Raw(u32),
    /// `RESET`, `EXTERNAL_IRQ` or `IRQ`.
    Name(String),
}

impl SignalRef {
    fn raw(&self) -> Result<u32, ScenarioError> {
        match self {
            Self::Raw(id) => Ok(*id),
            Self::Name(name) => name
                .parse::<SignalId>()
                .map(SignalId::raw)
                .map_err(ScenarioError::Signal),
        }
    }
}

/// Memory request in scenario form.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Full-width read.
    Read {
        /// Request address.
        address: u64,
    },
    /// Strobed write.
    Write {
        /// Request address.
        address: u64,
        /// Payload, lane `n` in bits `8n..8n+8`.
        data: u64,
        /// Byte enables; all lanes when absent.
        #[serde(default = "RequestKind::full_strobe")]
        strobe: u8,
    },
}

impl RequestKind {
    fn full_strobe() -> u8 {
        0xFF
    }

    fn to_request(self) -> BusRequest {
        match self {
            Self::Read { address } => BusRequest::read(address),
            Self::Write {
                address,
                data,
                strobe,
            } => BusRequest::write(address, data, strobe),
        }
    }
}

/// What a finished run produced.
#[derive(Debug)]
pub struct RunOutcome {
    /// One report per cycle that completed without a decode error.
    pub reports: Vec<CycleReport>,
    /// Requests dropped for a bad strobe, with the cycle they were presented on.
    pub rejected: Vec<(u64, BridgeError)>,
    /// Wrapper counters at the end of the run.
    pub stats: BridgeStats,
    /// Bytes typed by the console hook, if one was configured.
    pub console: Option<Vec<u8>>,
    /// RAM contents at the end of the run.
    pub memory: Ram,
}

impl Scenario {
    /// Reads and parses a scenario file.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Builds a wrapper from the scenario and drives every stimulus block through it.
    ///
    /// Decode errors do not stop the run: the offending cycle is recorded in
    /// [`RunOutcome::rejected`] and the clock keeps going.
    pub fn run(&self) -> Result<RunOutcome, ScenarioError> {
        let mut ram = Ram::new(self.memory.size, self.memory.base);
        for chunk in &self.memory.preload {
            ram.load(&chunk.bytes, chunk.offset);
        }

        let mut wrapper = RtlWrapper::new(&self.config, ram)?;
        let console = self.config.console.as_ref().map(|cfg| {
            let console = Rc::new(RefCell::new(CaptureConsole::new()));
            wrapper.set_hook(Some(Box::new(ConsoleInjection::from_config(
                Rc::clone(&console),
                cfg,
            ))));
            console
        });

        let mut driver = EdgeDriver::new(wrapper);
        let mut reports = Vec::new();
        let mut rejected = Vec::new();

        for block in &self.cycles {
            for signal in &block.raise {
                driver.wrapper_mut().raise_signal(signal.raw()?);
            }
            for signal in &block.lower {
                driver.wrapper_mut().lower_signal(signal.raw()?);
            }
            let request = block
                .request
                .map_or(BusRequest::IDLE, RequestKind::to_request);

            for _ in 0..block.repeat {
                let cycle = driver.time().cycle;
                match driver.tick_with_steps(&request, block.steps) {
                    Ok(report) => reports.push(report),
                    Err(err) => {
                        warn!(cycle, %err, "request rejected");
                        rejected.push((cycle, err));
                    }
                }
            }
        }

        info!(cycles = driver.time().cycle, "scenario finished");
        let wrapper = driver.into_wrapper();
        let stats = wrapper.stats().clone();
        Ok(RunOutcome {
            reports,
            rejected,
            stats,
            console: console.map(|c| c.borrow_mut().take()),
            memory: wrapper.into_bus(),
        })
    }
}

/// Renders the lines a report contributes to the run log.
///
/// A line is produced for every served request and for every change of the
/// reset or interrupt output relative to `prev`.
pub fn describe(report: &CycleReport, prev: &WrapperOutputs) -> Vec<String> {
    let mut lines = Vec::new();
    let out = &report.outputs;
    if out.reset != prev.reset {
        lines.push(format!("[{}] reset {}", report.time, level(out.reset)));
    }
    if out.interrupt != prev.interrupt {
        lines.push(format!("[{}] interrupt {}", report.time, level(out.interrupt)));
    }
    if report.response.valid {
        lines.push(format!(
            "[{}] response {:#018x}",
            report.time, report.response.data
        ));
    }
    lines
}

fn level(high: bool) -> &'static str {
    if high { "asserted" } else { "released" }
}
