//! Bus Transaction Bridge Tests.
//!
//! Verifies strobe decoding, the exact host bus call issued per request
//! kind, and that malformed or absent requests leave the bus untouched.

use mockall::Sequence;
use pretty_assertions::assert_eq;
use rstest::rstest;
use rtlbridge_core::common::BridgeError;
use rtlbridge_core::soc::{BusBridge, BusRequest, BusResponse, StrobeDecode, decode_strobe};

use crate::common::mocks::bus::{BusCall, MockBus, RecordingBus};

#[rstest]
#[case(0b1111_1111, 0, 8)]
#[case(0b0000_1111, 0, 4)]
#[case(0b0000_1100, 2, 2)]
#[case(0b0000_0110, 1, 2)]
#[case(0b1111_0000, 4, 4)]
#[case(0b1000_0000, 7, 1)]
#[case(0b0000_0001, 0, 1)]
#[case(0b0000_0000, 0, 0)]
fn decode_on_eight_byte_bus(#[case] strobe: u8, #[case] offset: usize, #[case] size: usize) {
    assert_eq!(decode_strobe(strobe, 8), Ok(StrobeDecode { offset, size }));
}

#[rstest]
#[case(0b0000_0101)]
#[case(0b1000_0001)]
#[case(0b0110_0110)]
#[case(0b1111_1110 ^ 0b0001_0000)]
fn gaps_are_decode_errors(#[case] strobe: u8) {
    assert_eq!(
        decode_strobe(strobe, 8),
        Err(BridgeError::NonContiguousStrobe { strobe })
    );
}

#[rstest]
#[case(4, 0b0001_0000)]
#[case(4, 0b1111_1111)]
#[case(2, 0b0000_0100)]
#[case(1, 0b0000_0010)]
fn lanes_beyond_width_are_rejected(#[case] width: usize, #[case] strobe: u8) {
    assert_eq!(
        decode_strobe(strobe, width),
        Err(BridgeError::StrobeOutOfRange { strobe, width })
    );
}

#[test]
fn narrow_bus_accepts_its_own_lanes() {
    assert_eq!(
        decode_strobe(0b0000_1111, 4),
        Ok(StrobeDecode { offset: 0, size: 4 })
    );
    assert_eq!(
        decode_strobe(0b0000_1000, 4),
        Ok(StrobeDecode { offset: 3, size: 1 })
    );
}

#[test]
fn bridge_rejects_unsupported_width() {
    assert_eq!(BusBridge::new(0), Err(BridgeError::UnsupportedBusWidth(0)));
    assert_eq!(BusBridge::new(9), Err(BridgeError::UnsupportedBusWidth(9)));
    assert_eq!(BusBridge::new(8).map(|b| b.width()), Ok(8));
}

#[test]
fn full_width_write_issues_one_eight_byte_call() {
    let bridge = BusBridge::default();
    let mut bus = MockBus::new();
    let _ = bus
        .expect_write()
        .withf(|addr, data| {
            *addr == 0x100
                && data.to_vec() == vec![0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11]
        })
        .times(1)
        .return_const(());
    let _ = bus.expect_read().never();

    let response = bridge
        .process(&BusRequest::write(0x100, 0x1122334455667788, 0xFF), &mut bus)
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(
        response,
        BusResponse {
            data: 0,
            valid: true
        }
    );
}

#[test]
fn low_half_write_issues_four_byte_call() {
    let bridge = BusBridge::default();
    let mut bus = MockBus::new();
    let _ = bus
        .expect_write()
        .withf(|addr, data| *addr == 0x200 && data.to_vec() == vec![0xDD, 0xCC, 0xBB, 0xAA])
        .times(1)
        .return_const(());

    let response = bridge
        .process(&BusRequest::write(0x200, 0xAABBCCDD, 0x0F), &mut bus)
        .unwrap_or_else(|e| panic!("{e}"));
    assert!(response.valid);
    assert_eq!(response.data, 0);
}

#[test]
fn strobed_write_takes_bytes_from_enabled_lanes() {
    let bridge = BusBridge::default();
    let mut bus = RecordingBus::new(0x400, 0);

    let request = BusRequest::write(0x100, 0x0000_0000_BEEF_0000, 0b0000_1100);
    let response = bridge
        .process(&request, &mut bus)
        .unwrap_or_else(|e| panic!("{e}"));

    assert!(response.valid);
    assert_eq!(
        bus.calls,
        vec![BusCall::Write {
            addr: 0x102,
            data: vec![0xEF, 0xBE],
        }]
    );
    assert_eq!(bus.ram.read_u64(0x100), 0x0000_0000_BEEF_0000);
}

#[test]
fn read_ignores_strobe_and_moves_full_width() {
    let bridge = BusBridge::default();
    let mut bus = MockBus::new();
    let mut seq = Sequence::new();
    let _ = bus
        .expect_read()
        .withf(|addr, buf| *addr == 0x80 && buf.len() == 8)
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, buf| buf.copy_from_slice(&0xCAFE_F00D_1234_5678u64.to_le_bytes()));
    let _ = bus.expect_write().never();

    let request = BusRequest {
        valid: true,
        address: 0x80,
        write: false,
        data: 0xFFFF,
        strobe: 0b0000_0001,
    };
    let response = bridge
        .process(&request, &mut bus)
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(
        response,
        BusResponse {
            data: 0xCAFE_F00D_1234_5678,
            valid: true
        }
    );
}

#[test]
fn narrow_bus_read_is_zero_extended() {
    let bridge = BusBridge::new(4).unwrap_or_else(|e| panic!("{e}"));
    let mut bus = RecordingBus::new(0x100, 0);
    bus.ram.load(&[1, 2, 3, 4, 5, 6, 7, 8], 0x10);

    let response = bridge
        .process(&BusRequest::read(0x10), &mut bus)
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(response.data, 0x0403_0201);
    assert_eq!(bus.calls, vec![BusCall::Read { addr: 0x10, len: 4 }]);
}

#[test]
fn idle_request_does_not_touch_bus() {
    let bridge = BusBridge::default();
    let mut bus = MockBus::new();
    let _ = bus.expect_read().never();
    let _ = bus.expect_write().never();

    let request = BusRequest {
        valid: false,
        address: 0x100,
        write: true,
        data: 0x1234,
        strobe: 0xFF,
    };
    let response = bridge
        .process(&request, &mut bus)
        .unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(response, BusResponse::IDLE);
}

#[test]
fn empty_strobe_write_is_forwarded_as_zero_length_call() {
    let bridge = BusBridge::default();
    let mut bus = RecordingBus::new(0x100, 0);

    let response = bridge
        .process(&BusRequest::write(0x40, 0xFFFF_FFFF, 0), &mut bus)
        .unwrap_or_else(|e| panic!("{e}"));

    assert!(response.valid);
    assert_eq!(
        bus.calls,
        vec![BusCall::Write {
            addr: 0x40,
            data: Vec::new(),
        }]
    );
    assert_eq!(bus.ram.read_u64(0x40), 0);
}

#[test]
fn non_contiguous_write_is_refused_before_bus_access() {
    let bridge = BusBridge::default();
    let mut bus = MockBus::new();
    let _ = bus.expect_write().never();

    let result = bridge.process(&BusRequest::write(0x0, 0xFFFF, 0b0000_0101), &mut bus);
    assert_eq!(
        result,
        Err(BridgeError::NonContiguousStrobe {
            strobe: 0b0000_0101
        })
    );
}
