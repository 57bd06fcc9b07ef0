//! Cooperative monitor loop.
//!
//! [`Monitor`] owns the registry and every board capability. Each call to
//! [`Monitor::step`] reads the clock once and runs up to three cadences:
//!
//! * **acquisition**: every iteration (or only when the interrupt line is
//!   pending), advance the driver with `poll`;
//! * **drain**: once more than `update_interval_ms` elapsed since the previous
//!   drain, pull every queued frame into the registry;
//! * **report**: once more than `log_interval_ms` elapsed since the previous
//!   report, print the registry.
//!
//! Cadences compare the unsigned difference between clock readings, so a
//! wraparound of the millisecond counter does not disturb them. Ticks drift
//! by up to one loop iteration; nothing here is a real-time guarantee.
use core::convert::Infallible;
use core::fmt::{self, Write};

use crate::{
    core::REGISTRY_CAPACITY,
    error::ConfigurationError,
    monitor::{
        config::MonitorConfig,
        registry::{Observation, ObservationRegistry},
        reporter::{ReportSummary, Reporter, EOL},
    },
    transport::{
        config::SourceConfig,
        traits::{
            clock::{elapsed_ms, Clock},
            frame_source::FrameSource,
            indicator::{Indicator, NoIndicator},
            interrupt_line::{InterruptLine, NoInterruptLine},
            monitor_timer::MonitorTimer,
        },
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Outcome of the driver initialization.
pub enum Health {
    /// `start` was never called.
    Unconfigured,
    Ready,
    /// The driver rejected its configuration; no frame will ever arrive.
    Degraded(ConfigurationError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// What a single loop iteration did.
pub struct StepOutcome {
    /// The driver was polled.
    pub polled: bool,
    /// The drain cadence fired.
    pub drained: bool,
    /// Frames folded into the registry.
    pub received: u32,
    /// Frames lost to receive failures.
    pub failed: u32,
    /// Frames dropped because the registry was full.
    pub dropped: u32,
    /// The report cadence fired.
    pub reported: bool,
}

/// Application context: registry, frame source, clock and board peripherals.
pub struct Monitor<S, C, I = NoInterruptLine, L = NoIndicator, const N: usize = REGISTRY_CAPACITY>
where
    S: FrameSource,
    C: Clock,
    I: InterruptLine,
    L: Indicator,
{
    source: S,
    clock: C,
    interrupt: I,
    indicator: L,
    config: MonitorConfig,
    reporter: Reporter,
    registry: ObservationRegistry<N>,
    health: Health,
    error_count: u32,
    started_at: u32,
    last_update_at: u32,
    last_log_at: u32,
}

impl<S, C> Monitor<S, C>
where
    S: FrameSource,
    C: Clock,
{
    /// Monitor tracking up to [`REGISTRY_CAPACITY`] identifiers, polling on
    /// every iteration, without liveness indicator.
    pub fn new(source: S, clock: C, config: MonitorConfig) -> Self {
        Self::new_sized(source, clock, config)
    }
}

impl<S, C, const N: usize> Monitor<S, C, NoInterruptLine, NoIndicator, N>
where
    S: FrameSource,
    C: Clock,
{
    /// Same as [`Monitor::new`] with a registry of `N` slots.
    ///
    /// Both cadences start counting from the current clock reading.
    pub fn new_sized(source: S, clock: C, config: MonitorConfig) -> Self {
        let started_at = clock.now_millis();
        Self {
            source,
            clock,
            interrupt: NoInterruptLine,
            indicator: NoIndicator,
            config,
            reporter: Reporter::new(config.format),
            registry: ObservationRegistry::new(),
            health: Health::Unconfigured,
            error_count: 0,
            started_at,
            last_update_at: started_at,
            last_log_at: started_at,
        }
    }
}

impl<S, C, I, L, const N: usize> Monitor<S, C, I, L, N>
where
    S: FrameSource,
    C: Clock,
    I: InterruptLine,
    L: Indicator,
{
    /// Only poll the driver when `interrupt` reports pending activity.
    pub fn with_interrupt_line<I2: InterruptLine>(
        self,
        interrupt: I2,
    ) -> Monitor<S, C, I2, L, N> {
        Monitor {
            source: self.source,
            clock: self.clock,
            interrupt,
            indicator: self.indicator,
            config: self.config,
            reporter: self.reporter,
            registry: self.registry,
            health: self.health,
            error_count: self.error_count,
            started_at: self.started_at,
            last_update_at: self.last_update_at,
            last_log_at: self.last_log_at,
        }
    }

    /// Toggle `indicator` on every drained frame.
    pub fn with_indicator<L2: Indicator>(self, indicator: L2) -> Monitor<S, C, I, L2, N> {
        Monitor {
            source: self.source,
            clock: self.clock,
            interrupt: self.interrupt,
            indicator,
            config: self.config,
            reporter: self.reporter,
            registry: self.registry,
            health: self.health,
            error_count: self.error_count,
            started_at: self.started_at,
            last_update_at: self.last_update_at,
            last_log_at: self.last_log_at,
        }
    }

    /// Configure the driver once and print the outcome.
    ///
    /// A rejected configuration is not fatal: the monitor keeps running in
    /// [`Health::Degraded`] and simply never sees a frame. No retry is made.
    pub fn start<W: Write>(
        &mut self,
        config: &SourceConfig,
        out: &mut W,
    ) -> Result<Health, fmt::Error> {
        write!(out, "initializing device...{}", EOL)?;

        match self.source.initialize(config) {
            Ok(()) => {
                #[cfg(feature = "defmt")]
                defmt::info!("CAN-FD source initialized: {}", config);
                self.health = Health::Ready;
                write!(out, "initialized device!{}", EOL)?;
            }
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::error!("CAN-FD source rejected its configuration: {}", err);
                self.health = Health::Degraded(err);
                write!(out, "{}{}", err, EOL)?;
            }
        }

        Ok(self.health)
    }

    /// Run one loop iteration. Only a failing `out` sink is reported as error.
    pub fn step<W: Write>(&mut self, out: &mut W) -> Result<StepOutcome, fmt::Error> {
        let now = self.clock.now_millis();
        let mut outcome = StepOutcome::default();

        // Acquisition
        if self.interrupt.take_pending() {
            self.source.poll();
            outcome.polled = true;
        }

        // Drain
        if elapsed_ms(now, self.last_update_at) > self.config.update_interval_ms {
            self.drain(now, &mut outcome);
            self.last_update_at = now;
        }

        // Report
        let since_report = elapsed_ms(now, self.last_log_at);
        if since_report > self.config.log_interval_ms {
            self.last_log_at = now;
            outcome.reported = true;
            let summary = ReportSummary {
                elapsed_ms: elapsed_ms(now, self.started_at),
                error_count: self.error_count,
                dropped_count: self.registry.dropped_count(),
            };
            self.reporter
                .report(&mut self.registry, now, since_report, &summary, out)?;
        }

        Ok(outcome)
    }

    /// Busy loop. Returns only when `out` fails.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<Infallible, fmt::Error> {
        loop {
            self.step(out)?;
        }
    }

    /// Loop pausing `loop_delay_ms` (or 0 ms) on `timer` between iterations.
    /// Returns only when `out` fails.
    pub async fn run_with_delay<W: Write, T: MonitorTimer>(
        &mut self,
        out: &mut W,
        timer: &mut T,
    ) -> Result<Infallible, fmt::Error> {
        let delay = self.config.loop_delay_ms.unwrap_or(0);
        loop {
            self.step(out)?;
            timer.delay_ms(delay).await;
        }
    }

    /// Pull queued frames into the registry, in the order the source yields them.
    fn drain(&mut self, now: u32, outcome: &mut StepOutcome) {
        outcome.drained = true;
        let mut pulled = 0usize;

        while self.source.available() {
            if self.config.drain_limit.is_some_and(|limit| pulled >= limit.get()) {
                #[cfg(feature = "defmt")]
                defmt::debug!("Drain limit reached, {} frames pulled", pulled);
                break;
            }
            pulled += 1;
            self.indicator.toggle();

            match self.source.receive() {
                Ok(frame) => match self.registry.observe(&frame, now) {
                    Observation::Dropped => {
                        #[cfg(feature = "defmt")]
                        defmt::warn!("Registry full, dropping id {}", frame.raw_id());
                        outcome.dropped += 1;
                    }
                    Observation::Inserted { .. } | Observation::Updated { .. } => {
                        outcome.received += 1;
                    }
                },
                Err(_err) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Frame receive failed: {}", defmt::Debug2Format(&_err));
                    self.error_count = self.error_count.saturating_add(1);
                    outcome.failed += 1;
                }
            }
        }
    }

    pub fn registry(&self) -> &ObservationRegistry<N> {
        &self.registry
    }

    /// Cumulative receive failures.
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn health(&self) -> Health {
        self.health
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn indicator(&self) -> &L {
        &self.indicator
    }
}
