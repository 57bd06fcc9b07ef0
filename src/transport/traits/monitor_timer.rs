//! Asynchronous delay used to bound the monitor loop rate.

/// Timer abstraction; only the inter-iteration delay depends on it.
pub trait MonitorTimer {
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u32)
        -> impl core::future::Future<Output = ()> + 'a;
}

/// Delay implemented with `embassy_time::Timer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyTimer;

impl MonitorTimer for EmbassyTimer {
    async fn delay_ms(&mut self, millis: u32) {
        embassy_time::Timer::after(embassy_time::Duration::from_millis(millis as u64)).await;
    }
}
