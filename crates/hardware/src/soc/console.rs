//! Capturing serial console.

use std::collections::VecDeque;

use super::traits::Console;

/// Console that keeps every received byte until it is taken.
#[derive(Clone, Debug, Default)]
pub struct CaptureConsole {
    rx_queue: VecDeque<u8>,
    writes: usize,
}

impl CaptureConsole {
    /// Creates an empty console.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes received so far, oldest first.
    pub fn pending(&self) -> Vec<u8> {
        self.rx_queue.iter().copied().collect()
    }

    /// Removes and returns all received bytes.
    pub fn take(&mut self) -> Vec<u8> {
        self.rx_queue.drain(..).collect()
    }

    /// Number of `write_data` calls received.
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl Console for CaptureConsole {
    fn write_data(&mut self, data: &[u8]) {
        self.rx_queue.extend(data);
        self.writes += 1;
    }
}
