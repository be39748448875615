//! Console Injection Hook Tests.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use rtlbridge_core::common::SimTime;
use rtlbridge_core::config::{Config, ConsoleInjectionConfig};
use rtlbridge_core::core::RtlWrapper;
use rtlbridge_core::sim::{ConsoleInjection, EdgeDriver, StepHook};
use rtlbridge_core::soc::{CaptureConsole, Ram};

#[test]
fn payload_is_written_once_at_trigger_step() {
    let mut hook = ConsoleInjection::new(CaptureConsole::new(), 5, "go\n");
    for step in 0..10 {
        hook.on_falling_edge(SimTime::new(step, step));
    }
    assert_eq!(hook.injections(), 1);
    assert_eq!(hook.console().pending(), b"go\n".to_vec());
}

#[test]
fn held_step_counter_does_not_repeat_payload() {
    let mut hook = ConsoleInjection::new(CaptureConsole::new(), 3, "x");
    // The kernel keeps the step counter at 3 for several cycles.
    for cycle in 0..6 {
        hook.on_falling_edge(SimTime::new(cycle, cycle.min(3)));
    }
    assert_eq!(hook.injections(), 1);
    assert_eq!(hook.console_mut().take(), b"x".to_vec());
    assert!(hook.console().pending().is_empty());
}

#[test]
fn skipped_trigger_step_never_fires() {
    let mut hook = ConsoleInjection::new(CaptureConsole::new(), 5, "x");
    for step in (0..20).step_by(2) {
        hook.on_falling_edge(SimTime::new(step, step));
    }
    assert_eq!(hook.injections(), 0);
}

#[test]
fn default_config_types_benchmark_command() {
    let mut hook = ConsoleInjection::from_config(
        CaptureConsole::new(),
        &ConsoleInjectionConfig::default(),
    );
    hook.on_falling_edge(SimTime::new(0, 5997));
    assert_eq!(hook.console().pending(), b"dhry\r\n".to_vec());
}

#[test]
fn hook_runs_inside_driven_wrapper() {
    let console = Rc::new(RefCell::new(CaptureConsole::new()));
    let hook = ConsoleInjection::new(Rc::clone(&console), 4, "boot\n");
    let wrapper = RtlWrapper::new(&Config::default(), Ram::new(0x100, 0))
        .unwrap_or_else(|e| panic!("{e}"))
        .with_hook(hook);
    let mut driver = EdgeDriver::new(wrapper);

    let _ = driver.run_idle(3).unwrap_or_else(|e| panic!("{e}"));
    assert!(console.borrow().pending().is_empty());

    let _ = driver.run_idle(5).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(console.borrow().pending(), b"boot\n".to_vec());
    assert_eq!(console.borrow().writes(), 1);
}
