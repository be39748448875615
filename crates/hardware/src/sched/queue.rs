//! Time-ordered callback queue.
//!
//! Registrations first land in a staging list. A drain cycle starts by moving
//! the staging list into the ordered heap, then pops every entry whose trigger
//! time has been reached. Anything registered while the drain is running goes
//! back to staging, so it can never be delivered twice in the same cycle and
//! is picked up by the next one.
//!
//! Entries are ordered by `(trigger_time, sequence)` where the sequence number
//! is assigned at registration; equal trigger times therefore come out in the
//! order they were registered.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;

use tracing::{trace, warn};

use super::listener::ListenerHandle;
use crate::common::{BridgeError, TimeDomain};
use crate::config::LateCallbackPolicy;

/// A pending notification.
pub struct CallbackEntry {
    /// Earliest time at which the listener may be called.
    pub trigger_time: u64,
    seq: u64,
    /// Listener to notify.
    pub listener: ListenerHandle,
}

impl fmt::Debug for CallbackEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackEntry")
            .field("trigger_time", &self.trigger_time)
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}

impl PartialEq for CallbackEntry {
    fn eq(&self, other: &Self) -> bool {
        self.trigger_time == other.trigger_time && self.seq == other.seq
    }
}

impl Eq for CallbackEntry {}

impl PartialOrd for CallbackEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CallbackEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.trigger_time, self.seq).cmp(&(other.trigger_time, other.seq))
    }
}

/// Exactly-once, time-ordered delivery queue for one time domain.
#[derive(Debug)]
pub struct CallbackQueue {
    domain: TimeDomain,
    policy: LateCallbackPolicy,
    /// Min-heap of entries visible to the current drain cycle.
    queued: BinaryHeap<Reverse<CallbackEntry>>,
    /// Entries registered since the last drain cycle began.
    pre_queued: Vec<CallbackEntry>,
    next_seq: u64,
    last_drained: Option<u64>,
}

impl CallbackQueue {
    /// Creates an empty queue for `domain`.
    pub fn new(domain: TimeDomain, policy: LateCallbackPolicy) -> Self {
        Self {
            domain,
            policy,
            queued: BinaryHeap::new(),
            pre_queued: Vec::new(),
            next_seq: 0,
            last_drained: None,
        }
    }

    /// Registers `listener` for `trigger_time`.
    ///
    /// Under [`LateCallbackPolicy::Reject`] a trigger time that is not strictly
    /// after the last drained time is refused; otherwise it is delivered by the
    /// next drain cycle.
    pub fn register(
        &mut self,
        listener: ListenerHandle,
        trigger_time: u64,
    ) -> Result<(), BridgeError> {
        if let Some(last_drained) = self.last_drained
            && trigger_time <= last_drained
            && self.policy == LateCallbackPolicy::Reject
        {
            warn!(
                domain = %self.domain,
                trigger_time, last_drained, "rejecting late callback registration"
            );
            return Err(BridgeError::CallbackInPast {
                domain: self.domain,
                requested: trigger_time,
                last_drained,
            });
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        trace!(domain = %self.domain, trigger_time, seq, "callback registered");
        self.pre_queued.push(CallbackEntry {
            trigger_time,
            seq,
            listener,
        });
        Ok(())
    }

    /// Starts a drain cycle at `now`: staged registrations become visible.
    pub fn begin_drain_cycle(&mut self, now: u64) {
        self.queued
            .extend(self.pre_queued.drain(..).map(Reverse));
        self.last_drained = Some(now);
    }

    /// Removes and returns the earliest entry due at `now`, if any.
    pub fn next_due(&mut self, now: u64) -> Option<CallbackEntry> {
        if self
            .queued
            .peek()
            .is_some_and(|Reverse(entry)| entry.trigger_time <= now)
        {
            self.queued.pop().map(|Reverse(entry)| entry)
        } else {
            None
        }
    }

    /// Trigger time of the earliest visible entry.
    pub fn peek_time(&self) -> Option<u64> {
        self.queued.peek().map(|Reverse(entry)| entry.trigger_time)
    }

    /// Number of undelivered entries, staged ones included.
    pub fn len(&self) -> usize {
        self.queued.len() + self.pre_queued.len()
    }

    /// Returns `true` when nothing is waiting for delivery.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Time domain this queue is ordered by.
    pub const fn domain(&self) -> TimeDomain {
        self.domain
    }

    /// Time passed to the most recent drain cycle.
    pub const fn last_drained(&self) -> Option<u64> {
        self.last_drained
    }
}
