//! Free-running millisecond clock.

/// Monotonic millisecond counter, modulo 2^32, no epoch alignment required.
pub trait Clock {
    fn now_millis(&self) -> u32;
}

/// Milliseconds elapsed from `since` to `now`, correct across one wraparound
/// of the counter.
#[inline]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Clock backed by the `embassy-time` driver, truncated to 32 bits.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_millis(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_millis(&self) -> u32 {
        (**self).now_millis()
    }
}
