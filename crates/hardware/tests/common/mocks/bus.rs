use mockall::mock;
use rtlbridge_core::soc::{HostBus, Ram};

mock! {
    pub Bus {}
    impl HostBus for Bus {
        fn read(&mut self, addr: u64, buf: &mut [u8]);
        fn write(&mut self, addr: u64, data: &[u8]);
    }
}

/// One call seen by a `RecordingBus`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BusCall {
    Read { addr: u64, len: usize },
    Write { addr: u64, data: Vec<u8> },
}

/// Plain memory that also logs every call made to it.
#[derive(Debug)]
pub struct RecordingBus {
    pub ram: Ram,
    pub calls: Vec<BusCall>,
}

impl RecordingBus {
    pub fn new(size: usize, base: u64) -> Self {
        Self {
            ram: Ram::new(size, base),
            calls: Vec::new(),
        }
    }

    pub fn writes(&self) -> Vec<&BusCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, BusCall::Write { .. }))
            .collect()
    }
}

impl HostBus for RecordingBus {
    fn read(&mut self, addr: u64, buf: &mut [u8]) {
        self.calls.push(BusCall::Read {
            addr,
            len: buf.len(),
        });
        self.ram.read(addr, buf);
    }

    fn write(&mut self, addr: u64, data: &[u8]) {
        self.calls.push(BusCall::Write {
            addr,
            data: data.to_vec(),
        });
        self.ram.write(addr, data);
    }
}
