//! Register File Tests.
//!
//! Drives the reset synchronizer and the interrupt latch through full
//! rising/combinational/falling cycles and checks what the core sees.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rtlbridge_core::common::SignalId;
use rtlbridge_core::core::{RegisterState, SignalInputs};
use rtlbridge_core::soc::BusResponse;

use crate::common::harness::TestContext;

#[test]
fn single_cycle_reset_is_filtered() {
    let mut tc = TestContext::new();

    tc.raise(SignalId::Reset);
    let pulse = tc.idle(1);
    tc.lower(SignalId::Reset);
    let after = tc.idle(4);

    assert!(
        pulse.iter().chain(after.iter()).all(|r| !r.outputs.reset),
        "one-cycle reset request reached the core"
    );
}

#[test]
fn reset_held_two_cycles_asserts_on_second() {
    let mut tc = TestContext::new();
    tc.raise(SignalId::Reset);

    let first = tc.idle(1);
    assert!(!first[0].outputs.reset);

    let second = tc.idle(1);
    assert!(second[0].outputs.reset);
    assert_eq!(tc.wrapper().registers().reset_shift, 0b11);
}

#[test]
fn reset_deasserts_after_one_low_sample() {
    let mut tc = TestContext::new();
    tc.raise(SignalId::Reset);
    let _ = tc.idle(3);
    assert!(tc.outputs().reset);

    tc.lower(SignalId::Reset);
    let reports = tc.idle(2);
    assert!(!reports[0].outputs.reset);
    assert!(!reports[1].outputs.reset);
}

#[rstest]
#[case(&[true, false, true, false, true], false)]
#[case(&[true, false, true, true], true)]
#[case(&[false, true, true, true, false], false)]
#[case(&[false, false, true, true], true)]
fn reset_output_tracks_last_two_samples(#[case] samples: &[bool], #[case] expected: bool) {
    let mut tc = TestContext::new();
    for &level in samples {
        if level {
            tc.raise(SignalId::Reset);
        } else {
            tc.lower(SignalId::Reset);
        }
        let _ = tc.idle(1);
    }
    assert_eq!(tc.outputs().reset, expected);
}

#[test]
fn interrupt_is_visible_one_commit_later() {
    let mut tc = TestContext::new();

    tc.raise(SignalId::ExternalIrq);
    assert!(!tc.outputs().interrupt);

    let raised = tc.idle(1);
    assert!(raised[0].outputs.interrupt);

    tc.lower(SignalId::ExternalIrq);
    assert!(tc.outputs().interrupt);
    let lowered = tc.idle(1);
    assert!(!lowered[0].outputs.interrupt);
}

#[test]
fn interrupt_does_not_pass_through_synchronizer() {
    let mut tc = TestContext::new();
    tc.raise(SignalId::ExternalIrq);
    let reports = tc.idle(1);
    assert!(reports[0].outputs.interrupt);
    assert!(!reports[0].outputs.reset);
    assert_eq!(tc.wrapper().registers().reset_shift, 0);
}

#[test]
fn next_state_leaves_committed_value_untouched() {
    let committed = RegisterState {
        reset_shift: 0b01,
        interrupt: false,
        resp_data: 7,
        resp_valid: true,
    };
    let inputs = SignalInputs {
        reset_request: true,
        interrupt_request: true,
    };

    let next = committed.next(&inputs, BusResponse::IDLE);

    assert_eq!(
        next,
        RegisterState {
            reset_shift: 0b11,
            interrupt: true,
            resp_data: 0,
            resp_valid: false,
        }
    );
    assert_eq!(committed.reset_shift, 0b01);
    assert_eq!(committed.resp_data, 7);
}
