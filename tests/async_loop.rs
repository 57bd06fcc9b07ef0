//! The delayed loop under an async executor, with real clocks.
mod helpers;

use helpers::SimulatedBus;
use korri_fdmon::monitor::{config::MonitorConfig, scheduler::Monitor};
use korri_fdmon::transport::traits::{
    clock::{Clock, EmbassyClock},
    monitor_timer::{EmbassyTimer, MonitorTimer},
};
use std::time::Instant;
use tokio::time::{sleep, timeout, Duration};

/// Clock reading `std::time::Instant` since creation.
struct StdClock(Instant);

impl Clock for StdClock {
    fn now_millis(&self) -> u32 {
        self.0.elapsed().as_millis() as u32
    }
}

/// Timer based on `tokio::time::sleep`.
struct TokioTimer {
    delays: u32,
}

impl MonitorTimer for TokioTimer {
    async fn delay_ms(&mut self, millis: u32) {
        self.delays += 1;
        sleep(Duration::from_millis(millis as u64)).await;
    }
}

#[tokio::test]
/// The loop keeps stepping, sleeping between iterations, until cancelled.
async fn delayed_loop_reports_periodically() {
    let config = MonitorConfig::new()
        .with_update_interval(20)
        .with_log_interval(100)
        .with_loop_delay(5);
    let mut bus = SimulatedBus::default();
    for _ in 0..4 {
        bus.push(0x120, &[1, 2, 3, 4]);
    }
    let mut monitor = Monitor::new(bus, StdClock(Instant::now()), config);
    let mut timer = TokioTimer { delays: 0 };
    let mut out = String::new();

    let result = timeout(
        Duration::from_millis(350),
        monitor.run_with_delay(&mut out, &mut timer),
    )
    .await;
    assert!(result.is_err(), "loop must only stop when cancelled");

    assert!(timer.delays > 10);
    assert!(out.matches("==============================").count() >= 2);
    assert!(out.contains("id:  288 len:  4"));
    assert_eq!(monitor.registry().records().next().unwrap().total_count(), 4);
}

#[tokio::test]
/// Production clock and delay move together.
async fn embassy_clock_follows_embassy_timer() {
    let clock = EmbassyClock;
    let mut timer = EmbassyTimer;
    let before = clock.now_millis();
    timer.delay_ms(30).await;
    let after = clock.now_millis();
    assert!(after.wrapping_sub(before) >= 30);
}
