//! Plain memory host bus.
//!
//! A byte array mapped at a base address. Accesses outside the window never
//! fail: missing bytes read as zero and writes to them are dropped, which is
//! the contract the bridge expects from any host bus.

use super::traits::HostBus;

/// Flat RAM implementing [`HostBus`].
#[derive(Clone, Debug)]
pub struct Ram {
    data: Vec<u8>,
    base_addr: u64,
}

impl Ram {
    /// Creates `size` bytes of zeroed memory at `base_addr`.
    pub fn new(size: usize, base_addr: u64) -> Self {
        Self {
            data: vec![0; size],
            base_addr,
        }
    }

    /// Returns (base_address, size_in_bytes).
    pub fn address_range(&self) -> (u64, u64) {
        (self.base_addr, self.data.len() as u64)
    }

    /// Copies `data` into memory at a byte offset from the base.
    ///
    /// Used to preload images before a run; bytes past the end are dropped.
    pub fn load(&mut self, data: &[u8], offset: usize) {
        if offset >= self.data.len() {
            return;
        }
        let len = data.len().min(self.data.len() - offset);
        self.data[offset..offset + len].copy_from_slice(&data[..len]);
    }

    /// Returns `len` bytes at `addr` if the whole range is mapped.
    pub fn slice(&self, addr: u64, len: usize) -> Option<&[u8]> {
        let start = usize::try_from(addr.checked_sub(self.base_addr)?).ok()?;
        self.data.get(start..start.checked_add(len)?)
    }

    /// Reads a little-endian doubleword; unmapped bytes read as zero.
    pub fn read_u64(&self, addr: u64) -> u64 {
        let mut buf = [0u8; 8];
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.byte(addr.wrapping_add(i as u64)).copied().unwrap_or(0);
        }
        u64::from_le_bytes(buf)
    }

    fn index(&self, addr: u64) -> Option<usize> {
        let offset = usize::try_from(addr.checked_sub(self.base_addr)?).ok()?;
        (offset < self.data.len()).then_some(offset)
    }

    fn byte(&self, addr: u64) -> Option<&u8> {
        self.index(addr).map(|i| &self.data[i])
    }
}

impl HostBus for Ram {
    fn read(&mut self, addr: u64, buf: &mut [u8]) {
        for (i, byte) in buf.iter_mut().enumerate() {
            *byte = self.byte(addr.wrapping_add(i as u64)).copied().unwrap_or(0);
        }
    }

    fn write(&mut self, addr: u64, data: &[u8]) {
        for (i, &byte) in data.iter().enumerate() {
            if let Some(idx) = self.index(addr.wrapping_add(i as u64)) {
                self.data[idx] = byte;
            }
        }
    }
}
