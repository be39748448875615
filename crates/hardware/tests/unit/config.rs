//! Configuration Tests.

use pretty_assertions::assert_eq;
use rtlbridge_core::common::BridgeError;
use rtlbridge_core::config::{Config, LateCallbackPolicy};
use rtlbridge_core::core::RtlWrapper;
use rtlbridge_core::soc::Ram;

#[test]
fn defaults_describe_a_64_bit_bus_at_1mhz() {
    let config = Config::default();
    assert_eq!(config.bus.width_bytes, 8);
    assert!((config.clock.hz - 1e6).abs() < f64::EPSILON);
    assert!((config.clock.time_resolution_secs - 1e-12).abs() < f64::EPSILON);
    assert_eq!(config.callbacks.late_policy, LateCallbackPolicy::DeliverNextDrain);
    assert!(config.console.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn empty_json_equals_defaults() {
    let config: Config = serde_json::from_str("{}").unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(config.bus.width_bytes, Config::default().bus.width_bytes);
    assert_eq!(config.callbacks.late_policy, LateCallbackPolicy::default());
}

#[test]
fn console_section_fills_missing_fields() {
    let config: Config = serde_json::from_str(r#"{ "console": {} }"#)
        .unwrap_or_else(|e| panic!("{e}"));
    let console = config.console.unwrap_or_else(|| panic!("console section lost"));
    assert_eq!(console.step, 5997);
    assert_eq!(console.payload, "dhry\r\n");

    let config: Config =
        serde_json::from_str(r#"{ "console": { "step": 12, "payload": "ls\n" } }"#)
            .unwrap_or_else(|e| panic!("{e}"));
    let console = config.console.unwrap_or_else(|| panic!("console section lost"));
    assert_eq!(console.step, 12);
    assert_eq!(console.payload, "ls\n");
}

#[test]
fn unknown_policy_name_is_rejected() {
    let result: Result<Config, _> =
        serde_json::from_str(r#"{ "callbacks": { "late_policy": "drop" } }"#);
    assert!(result.is_err());
}

#[test]
fn validate_reports_first_bad_field() {
    let mut config = Config::default();
    config.bus.width_bytes = 16;
    assert_eq!(config.validate(), Err(BridgeError::UnsupportedBusWidth(16)));

    let mut config = Config::default();
    config.clock.hz = 0.0;
    assert!(matches!(
        config.validate(),
        Err(BridgeError::InvalidClockRate(_))
    ));

    let mut config = Config::default();
    config.clock.time_resolution_secs = f64::NAN;
    assert!(matches!(
        config.validate(),
        Err(BridgeError::InvalidTimeResolution(_))
    ));
}

#[test]
fn wrapper_refuses_invalid_config() {
    let mut config = Config::default();
    config.bus.width_bytes = 9;
    let result = RtlWrapper::new(&config, Ram::new(16, 0));
    assert!(matches!(result, Err(BridgeError::UnsupportedBusWidth(9))));
}

#[test]
fn narrow_bus_config_builds_narrow_bridge() {
    let config: Config = serde_json::from_str(r#"{ "bus": { "width_bytes": 4 } }"#)
        .unwrap_or_else(|e| panic!("{e}"));
    let wrapper = RtlWrapper::new(&config, Ram::new(16, 0)).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(wrapper.bus_width(), 4);
}
