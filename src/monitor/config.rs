//! Cadences and report layout for the monitor loop.
use core::num::NonZeroUsize;

use crate::core::{LOG_DURATION_MS, UPDATE_DURATION_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Report layout.
pub enum ReportFormat {
    /// Identifier, length, rate and age per line, closed by `END`.
    #[default]
    Basic,
    /// Adds error/drop counters and per-identifier totals; wraps long payloads.
    Extended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Monitor loop settings.
pub struct MonitorConfig {
    /// Minimum time between two drains of the frame source (ms).
    pub update_interval_ms: u32,
    /// Minimum time between two reports (ms).
    pub log_interval_ms: u32,
    pub format: ReportFormat,
    /// Optional pause between loop iterations (ms). Only bounds CPU usage.
    pub loop_delay_ms: Option<u32>,
    /// Maximum frames pulled per drain. `None` drains until the source is empty.
    pub drain_limit: Option<NonZeroUsize>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MonitorConfig {
    pub const fn new() -> Self {
        Self {
            update_interval_ms: UPDATE_DURATION_MS,
            log_interval_ms: LOG_DURATION_MS,
            format: ReportFormat::Basic,
            loop_delay_ms: None,
            drain_limit: None,
        }
    }

    pub fn with_update_interval(mut self, millis: u32) -> Self {
        self.update_interval_ms = millis;
        self
    }

    pub fn with_log_interval(mut self, millis: u32) -> Self {
        self.log_interval_ms = millis;
        self
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_loop_delay(mut self, millis: u32) -> Self {
        self.loop_delay_ms = Some(millis);
        self
    }

    /// Cap the frames pulled per drain. `0` means no cap.
    pub fn with_drain_limit(mut self, frames: usize) -> Self {
        self.drain_limit = NonZeroUsize::new(frames);
        self
    }
}
