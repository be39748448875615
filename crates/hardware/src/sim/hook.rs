//! Falling-edge test hooks.
//!
//! A hook runs after both callback queues have been drained and before the
//! bus request is served. It is an extension point for test harnesses; the
//! wrapper works the same with no hook installed.

use tracing::debug;

use crate::common::SimTime;
use crate::config::ConsoleInjectionConfig;
use crate::soc::traits::Console;

/// Code run once per falling edge with the kernel's counters.
pub trait StepHook {
    /// Called after the drain phase of every falling edge.
    fn on_falling_edge(&mut self, time: SimTime);
}

/// Types a fixed payload into a console when the step counter reaches a trigger value.
///
/// The payload is written on the first falling edge whose step equals the
/// trigger and whose step differs from the one seen on the previous edge, so a
/// kernel that holds the step counter across several cycles does not repeat it.
#[derive(Debug)]
pub struct ConsoleInjection<C> {
    console: C,
    trigger_step: u64,
    payload: Vec<u8>,
    last_step: Option<u64>,
    injections: usize,
}

impl<C: Console> ConsoleInjection<C> {
    /// Creates a hook that writes `payload` to `console` at `trigger_step`.
    pub fn new(console: C, trigger_step: u64, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            console,
            trigger_step,
            payload: payload.into(),
            last_step: None,
            injections: 0,
        }
    }

    /// Creates a hook from its configuration section.
    pub fn from_config(console: C, config: &ConsoleInjectionConfig) -> Self {
        Self::new(console, config.step, config.payload.as_bytes())
    }

    /// Console the payload is written to.
    pub const fn console(&self) -> &C {
        &self.console
    }

    /// Mutable access to the console.
    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    /// Number of times the payload has been written.
    pub const fn injections(&self) -> usize {
        self.injections
    }
}

impl<C: Console> StepHook for ConsoleInjection<C> {
    fn on_falling_edge(&mut self, time: SimTime) {
        if time.step == self.trigger_step && self.last_step != Some(time.step) {
            debug!(step = time.step, len = self.payload.len(), "injecting console input");
            self.console.write_data(&self.payload);
            self.injections += 1;
        }
        self.last_step = Some(time.step);
    }
}
