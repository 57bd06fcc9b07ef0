//! Boards wiring the controller interrupt pin only poll the driver when the
//! line is pending.
mod helpers;

use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};
use embassy_sync::signal::Signal;
use helpers::{ManualClock, SimulatedBus};
use korri_fdmon::monitor::{config::MonitorConfig, scheduler::Monitor};
use static_cell::StaticCell;

#[test]
/// Without a pending interrupt the driver is never polled and nothing is drained.
fn polling_follows_interrupt_line() {
    let irq: Signal<NoopRawMutex, ()> = Signal::new();
    let clock = ManualClock::at(0);
    let mut monitor =
        Monitor::new(SimulatedBus::default(), &clock, MonitorConfig::new()).with_interrupt_line(&irq);
    let mut out = String::new();

    monitor.source_mut().push(0x10, &[1]);
    clock.set(60);
    let outcome = monitor.step(&mut out).unwrap();
    assert!(!outcome.polled);
    assert!(outcome.drained);
    assert_eq!(outcome.received, 0);
    assert_eq!(monitor.source().polls, 0);

    irq.signal(());
    clock.set(70);
    assert!(monitor.step(&mut out).unwrap().polled);
    // The notification is consumed.
    clock.set(80);
    assert!(!monitor.step(&mut out).unwrap().polled);
    assert_eq!(monitor.source().polls, 1);

    clock.set(130);
    assert_eq!(monitor.step(&mut out).unwrap().received, 1);
    assert_eq!(monitor.source().pending(), 0);
}

static IRQ: StaticCell<Signal<CriticalSectionRawMutex, ()>> = StaticCell::new();

#[test]
/// The line can be raised from another context (interrupt handler).
fn interrupt_raised_from_other_thread() {
    let irq: &'static Signal<CriticalSectionRawMutex, ()> = IRQ.init(Signal::new());
    let clock = ManualClock::at(0);
    let mut monitor =
        Monitor::new(SimulatedBus::default(), &clock, MonitorConfig::new()).with_interrupt_line(irq);
    monitor.source_mut().push(0x7FF, &[0xAA; 64]);

    std::thread::spawn(move || irq.signal(()))
        .join()
        .expect("isr thread");

    clock.set(51);
    let outcome = monitor.step(&mut String::new()).unwrap();
    assert!(outcome.polled);
    assert_eq!(outcome.received, 1);
    let record = monitor.registry().records().next().unwrap();
    assert_eq!(record.len(), 64);
}
