//! Listener and scheduler traits.

use std::cell::RefCell;
use std::rc::Rc;

use crate::common::{BridgeError, TimeDomain};

/// Component notified when a registered trigger time is reached.
pub trait ClockListener {
    /// Called once per registration, at the first drain whose time is at or after
    /// the trigger time. `now` is the current counter of `domain`, not the trigger time.
    ///
    /// `sched` accepts new registrations; they become visible on the next drain cycle.
    fn step_callback(&mut self, domain: TimeDomain, now: u64, sched: &mut dyn Scheduler);
}

/// Shared handle to a listener; the same listener may sit in several queues.
pub type ListenerHandle = Rc<RefCell<dyn ClockListener>>;

/// Registration entry points offered to timing-dependent components.
pub trait Scheduler {
    /// Requests a notification at clock cycle `trigger_cycle`.
    fn register_clock_callback(
        &mut self,
        listener: ListenerHandle,
        trigger_cycle: u64,
    ) -> Result<(), BridgeError>;

    /// Requests a notification at step `trigger_step`.
    fn register_step_callback(
        &mut self,
        listener: ListenerHandle,
        trigger_step: u64,
    ) -> Result<(), BridgeError>;
}
