//! Bus transaction bridge.
//!
//! Converts the RTL memory request presented at a falling edge into exactly
//! one host bus call. Writes are narrowed by the byte-enable strobe: the
//! lowest set bit gives the lane offset and the run of set bits starting
//! there gives the size. Reads always move the full bus width.
//!
//! # Strobe decoding
//!
//! | strobe (8-byte bus) | offset | size |
//! |---------------------|--------|------|
//! | `0b1111_1111`       | 0      | 8    |
//! | `0b0000_1111`       | 0      | 4    |
//! | `0b0000_1100`       | 2      | 2    |
//! | `0b0000_0000`       | 0      | 0    |
//! | `0b0000_0101`       | error  |      |

use tracing::debug;

use super::traits::HostBus;
use crate::common::BridgeError;
use crate::common::constants::MAX_BUS_WIDTH_BYTES;

/// Memory request driven by the CPU core for the current step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusRequest {
    /// A request is present.
    pub valid: bool,
    /// Bus-aligned request address.
    pub address: u64,
    /// Write when set, read otherwise.
    pub write: bool,
    /// Write payload, byte lane `n` in bits `8n..8n+8`.
    pub data: u64,
    /// Byte-enable mask, one bit per lane.
    pub strobe: u8,
}

impl BusRequest {
    /// No request.
    pub const IDLE: Self = Self {
        valid: false,
        address: 0,
        write: false,
        data: 0,
        strobe: 0,
    };

    /// Read of the full bus width at `address`.
    pub const fn read(address: u64) -> Self {
        Self {
            valid: true,
            address,
            write: false,
            data: 0,
            strobe: 0xFF,
        }
    }

    /// Write of the lanes selected by `strobe`.
    pub const fn write(address: u64, data: u64, strobe: u8) -> Self {
        Self {
            valid: true,
            address,
            write: true,
            data,
            strobe,
        }
    }
}

/// Response produced by one falling-edge step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BusResponse {
    /// Read data; zero for writes.
    pub data: u64,
    /// Set only for the step that served a request.
    pub valid: bool,
}

impl BusResponse {
    /// No response.
    pub const IDLE: Self = Self {
        data: 0,
        valid: false,
    };
}

/// Lane offset and transfer size extracted from a strobe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StrobeDecode {
    /// Index of the first enabled lane.
    pub offset: usize,
    /// Number of enabled lanes.
    pub size: usize,
}

/// Decodes `strobe` for a bus of `width` bytes.
///
/// A zero strobe decodes to an empty transfer at lane 0. Lanes at or above
/// `width` and gaps between enabled lanes are rejected.
pub fn decode_strobe(strobe: u8, width: usize) -> Result<StrobeDecode, BridgeError> {
    if strobe == 0 {
        return Ok(StrobeDecode::default());
    }
    if width < MAX_BUS_WIDTH_BYTES && strobe >> width != 0 {
        return Err(BridgeError::StrobeOutOfRange { strobe, width });
    }
    let offset = strobe.trailing_zeros() as usize;
    let size = (strobe >> offset).trailing_ones() as usize;
    if offset + size < MAX_BUS_WIDTH_BYTES && strobe >> (offset + size) != 0 {
        return Err(BridgeError::NonContiguousStrobe { strobe });
    }
    Ok(StrobeDecode { offset, size })
}

/// Request-to-host-call translator for a bus of fixed width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusBridge {
    width: usize,
}

impl BusBridge {
    /// Creates a bridge for a `width`-byte bus.
    pub fn new(width: usize) -> Result<Self, BridgeError> {
        if width == 0 || width > MAX_BUS_WIDTH_BYTES {
            return Err(BridgeError::UnsupportedBusWidth(width));
        }
        Ok(Self { width })
    }

    /// Bus width in bytes.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Serves `request` with at most one call on `bus`.
    ///
    /// An invalid request yields [`BusResponse::IDLE`] without touching the bus.
    /// A malformed write strobe is reported before the bus is touched.
    pub fn process<B: HostBus + ?Sized>(
        &self,
        request: &BusRequest,
        bus: &mut B,
    ) -> Result<BusResponse, BridgeError> {
        if !request.valid {
            return Ok(BusResponse::IDLE);
        }

        if request.write {
            let StrobeDecode { offset, size } = decode_strobe(request.strobe, self.width)?;
            let addr = request.address.wrapping_add(offset as u64);
            let lanes = request.data.to_le_bytes();
            debug!("bus write {addr:#x} size={size} data={:#x}", request.data);
            bus.write(addr, &lanes[offset..offset + size]);
            return Ok(BusResponse {
                data: 0,
                valid: true,
            });
        }

        let mut lanes = [0u8; MAX_BUS_WIDTH_BYTES];
        bus.read(request.address, &mut lanes[..self.width]);
        let data = u64::from_le_bytes(lanes);
        debug!(
            "bus read {:#x} size={} data={data:#x}",
            request.address, self.width
        );
        Ok(BusResponse { data, valid: true })
    }
}

impl Default for BusBridge {
    fn default() -> Self {
        Self {
            width: crate::common::BUS_WIDTH_BYTES,
        }
    }
}
