//! Host-side collaborator traits.
//!
//! This module defines what the wrapper needs from the software side of the simulation:
//! 1. **HostBus:** Synchronous byte-addressed read/write; never fails.
//! 2. **Console:** Byte sink used by the console injection hook.

use std::cell::RefCell;
use std::rc::Rc;

/// Host memory bus reached by the bridge.
///
/// Both calls are synchronous and infallible. The transfer size is the slice
/// length; a zero-length call must be treated as a no-op.
pub trait HostBus {
    /// Fills `buf` with the bytes starting at `addr`.
    fn read(&mut self, addr: u64, buf: &mut [u8]);
    /// Stores `data` starting at `addr`.
    fn write(&mut self, addr: u64, data: &[u8]);
}

impl<B: HostBus + ?Sized> HostBus for Box<B> {
    fn read(&mut self, addr: u64, buf: &mut [u8]) {
        (**self).read(addr, buf);
    }

    fn write(&mut self, addr: u64, data: &[u8]) {
        (**self).write(addr, data);
    }
}

/// Serial console input, as seen by a test harness typing into it.
pub trait Console {
    /// Queues `data` as if it had been received on the serial line.
    fn write_data(&mut self, data: &[u8]);
}

impl<C: Console + ?Sized> Console for Rc<RefCell<C>> {
    fn write_data(&mut self, data: &[u8]) {
        self.borrow_mut().write_data(data);
    }
}
