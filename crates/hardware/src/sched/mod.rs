//! Callback scheduling for clock- and step-driven listeners.
//!
//! This module provides:
//! 1. **Traits:** `ClockListener` for notified components, `Scheduler` for registration.
//! 2. **Queue:** `CallbackQueue`, one per time domain, with exactly-once ordered delivery.
//! 3. **Pair:** `Callbacks`, which owns both queues and runs drain cycles against them.

/// Listener and scheduler traits.
pub mod listener;

/// Per-domain callback queue.
pub mod queue;

pub use listener::{ClockListener, ListenerHandle, Scheduler};
pub use queue::{CallbackEntry, CallbackQueue};

use tracing::trace;

use crate::common::{BridgeError, TimeDomain};
use crate::config::LateCallbackPolicy;

/// The clock queue and the step queue.
#[derive(Debug)]
pub struct Callbacks {
    clock: CallbackQueue,
    step: CallbackQueue,
}

impl Callbacks {
    /// Creates both queues with the same late-registration policy.
    pub fn new(policy: LateCallbackPolicy) -> Self {
        Self {
            clock: CallbackQueue::new(TimeDomain::Clock, policy),
            step: CallbackQueue::new(TimeDomain::Step, policy),
        }
    }

    /// Queue for `domain`.
    pub const fn queue(&self, domain: TimeDomain) -> &CallbackQueue {
        match domain {
            TimeDomain::Clock => &self.clock,
            TimeDomain::Step => &self.step,
        }
    }

    fn queue_mut(&mut self, domain: TimeDomain) -> &mut CallbackQueue {
        match domain {
            TimeDomain::Clock => &mut self.clock,
            TimeDomain::Step => &mut self.step,
        }
    }

    /// Runs one drain cycle of `domain` at `now` and returns how many listeners were called.
    ///
    /// Listeners may register further callbacks in either domain while they run;
    /// those are staged and never delivered by this call.
    pub fn drain(&mut self, domain: TimeDomain, now: u64) -> usize {
        self.queue_mut(domain).begin_drain_cycle(now);
        let mut delivered = 0;
        while let Some(entry) = self.queue_mut(domain).next_due(now) {
            trace!(%domain, now, trigger_time = entry.trigger_time, "delivering callback");
            entry.listener.borrow_mut().step_callback(domain, now, self);
            delivered += 1;
        }
        delivered
    }
}

impl Default for Callbacks {
    fn default() -> Self {
        Self::new(LateCallbackPolicy::default())
    }
}

impl Scheduler for Callbacks {
    fn register_clock_callback(
        &mut self,
        listener: ListenerHandle,
        trigger_cycle: u64,
    ) -> Result<(), BridgeError> {
        self.clock.register(listener, trigger_cycle)
    }

    fn register_step_callback(
        &mut self,
        listener: ListenerHandle,
        trigger_step: u64,
    ) -> Result<(), BridgeError> {
        self.step.register(listener, trigger_step)
    }
}
