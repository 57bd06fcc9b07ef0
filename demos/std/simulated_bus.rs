//! # Simulated bus demo
//!
//! Runs the monitor on a desktop against a simulated CAN-FD bus carrying
//! three periodic identifiers and the occasional corrupted frame, and prints
//! the extended report every second.
//!
//! ```bash
//! cargo run --example simulated_bus
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use embedded_can::{ExtendedId, Id, StandardId};
use korri_fdmon::{
    error::ConfigurationError,
    monitor::{
        config::{MonitorConfig, ReportFormat},
        scheduler::Monitor,
    },
    transport::{
        config::SourceConfig,
        fd_frame::FdFrame,
        traits::{clock::Clock, frame_source::FrameSource, indicator::Indicator},
    },
};

// ============================================================================
// Board doubles
// ============================================================================

struct StdClock(Instant);

impl Clock for StdClock {
    fn now_millis(&self) -> u32 {
        self.0.elapsed().as_millis() as u32
    }
}

/// Periodic sender on the simulated bus.
struct Talker {
    id: Id,
    period_ms: u32,
    len: usize,
    next_at: u32,
    counter: u8,
}

struct SimulatedBus {
    started: Instant,
    talkers: Vec<Talker>,
    queue: VecDeque<Option<FdFrame>>,
    ticks: u32,
}

impl SimulatedBus {
    fn new() -> Self {
        let talker = |id: Id, period_ms: u32, len: usize| Talker {
            id,
            period_ms,
            len,
            next_at: 0,
            counter: 0,
        };
        Self {
            started: Instant::now(),
            talkers: vec![
                talker(Id::Standard(StandardId::new(0x100).unwrap()), 100, 8),
                talker(Id::Standard(StandardId::new(0x200).unwrap()), 500, 20),
                talker(Id::Extended(ExtendedId::new(0x18FF_50E5).unwrap()), 250, 64),
            ],
            queue: VecDeque::new(),
            ticks: 0,
        }
    }
}

impl FrameSource for SimulatedBus {
    type Error = ();

    fn initialize(&mut self, config: &SourceConfig) -> Result<(), ConfigurationError> {
        println!(
            "bus: {} bit/s arbitration, {} bit/s data, {:?}",
            config.arbitration_bit_rate,
            config.data_bit_rate(),
            config.mode
        );
        Ok(())
    }

    fn poll(&mut self) {
        let now = self.started.elapsed().as_millis() as u32;
        self.ticks += 1;
        for talker in &mut self.talkers {
            while talker.next_at <= now {
                talker.next_at += talker.period_ms;
                talker.counter = talker.counter.wrapping_add(1);
                let mut payload = [0u8; 64];
                for (i, byte) in payload.iter_mut().enumerate() {
                    *byte = talker.counter.wrapping_add(i as u8);
                }
                self.queue
                    .push_back(FdFrame::new(talker.id, &payload[..talker.len]).ok());
            }
        }
        // One corrupted frame every few thousand polls.
        if self.ticks % 3000 == 0 {
            self.queue.push_back(None);
        }
    }

    fn available(&mut self) -> bool {
        !self.queue.is_empty()
    }

    fn receive(&mut self) -> Result<FdFrame, Self::Error> {
        self.queue.pop_front().flatten().ok_or(())
    }
}

#[derive(Default)]
struct ConsoleLed(bool);

impl Indicator for ConsoleLed {
    fn toggle(&mut self) {
        self.0 = !self.0;
    }
}

/// Forwards report text to stdout.
struct Stdout;

impl fmt::Write for Stdout {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        print!("{}", s);
        Ok(())
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() {
    let config = MonitorConfig::new()
        .with_log_interval(1000)
        .with_format(ReportFormat::Extended);
    let mut monitor = Monitor::new(SimulatedBus::new(), StdClock(Instant::now()), config)
        .with_indicator(ConsoleLed::default());

    let mut out = Stdout;
    monitor
        .start(&SourceConfig::listen_only(), &mut out)
        .expect("stdout");

    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        monitor.step(&mut out).expect("stdout");
        std::thread::sleep(Duration::from_millis(1));
    }

    println!("receive errors: {}", monitor.error_count());
}
