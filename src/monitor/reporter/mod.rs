//! Traffic report: per-identifier length, reception rate, total, age and a
//! hex dump of the last payload, written to any `core::fmt::Write` sink
//! (UART console, RTT channel, `String` in tests).
//!
//! ```text
//! ==============================
//! elapsed time[s]: 12.00
//! < Received message list >
//!
//! id:  256 len:  8 rate: 5.0 received at: 0.1
//!  01 02 03 04 05    06 07 08
//!
//! END
//! ```
use core::fmt::{self, Write};

use crate::monitor::{
    config::ReportFormat,
    registry::{ObservationRegistry, ObservedRecord},
};
use crate::transport::{fd_frame::raw_id, traits::clock::elapsed_ms};

/// Serial consoles expect CR LF.
pub const EOL: &str = "\r\n";

const SEPARATOR: &str = "==============================";
const BYTES_PER_GROUP: usize = 5;
const BYTES_PER_LINE: usize = 15;

/// Process-wide figures printed in the report header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ReportSummary {
    /// Time since the monitor started (ms).
    pub elapsed_ms: u32,
    /// Cumulative frame receive failures.
    pub error_count: u32,
    /// Frames dropped because the registry was full.
    pub dropped_count: u32,
}

/// Frames per second for `count` frames over `interval_ms`.
pub fn rate(count: u64, interval_ms: u32) -> f32 {
    if interval_ms == 0 {
        return 0.0;
    }
    count as f32 / (interval_ms as f32 / 1000.0)
}

/// Hex dump in groups of five bytes, optionally wrapped every fifteen bytes.
pub fn write_hex_dump<W: Write>(out: &mut W, payload: &[u8], wrap: bool) -> fmt::Result {
    for (index, byte) in payload.iter().enumerate() {
        if index > 0 && index % BYTES_PER_GROUP == 0 {
            if wrap && index % BYTES_PER_LINE == 0 {
                out.write_str(EOL)?;
            } else {
                out.write_str("   ")?;
            }
        }
        write!(out, " {:02x}", byte)?;
    }
    Ok(())
}

/// Renders the registry. Owns no state besides the per-record report snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    pub const fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// Write one report and snapshot every record's count.
    ///
    /// `interval_ms` is the time actually elapsed since the previous report,
    /// not the configured cadence. Counts are snapshotted even when the sink
    /// fails part-way; the first write error is returned afterwards.
    pub fn report<W: Write, const N: usize>(
        &self,
        registry: &mut ObservationRegistry<N>,
        now: u32,
        interval_ms: u32,
        summary: &ReportSummary,
        out: &mut W,
    ) -> fmt::Result {
        let mut result = self.write_header(summary, out);

        for record in registry.records_mut() {
            let fps = rate(record.count_since_report(), interval_ms);
            record.mark_reported();

            if result.is_err() {
                continue;
            }

            result = self.write_record(record, fps, now, out);
        }

        result?;
        if self.format == ReportFormat::Basic {
            write!(out, "END{}{}", EOL, EOL)?;
        }
        Ok(())
    }

    fn write_record<W: Write>(
        &self,
        record: &ObservedRecord,
        rate: f32,
        now: u32,
        out: &mut W,
    ) -> fmt::Result {
        let age_seconds = elapsed_ms(now, record.last_received_at()) as f32 / 1000.0;
        let extended = self.format == ReportFormat::Extended;

        write!(
            out,
            "id: {:4} len: {:2} rate: {:.1}",
            raw_id(record.identifier()),
            record.len(),
            rate
        )?;
        if extended {
            write!(out, " received count: {}", record.total_count())?;
        }
        write!(out, " received at: {:.1}{}", age_seconds, EOL)?;
        write_hex_dump(out, record.payload(), extended)?;
        write!(out, "{}{}", EOL, EOL)
    }

    fn write_header<W: Write>(&self, summary: &ReportSummary, out: &mut W) -> fmt::Result {
        write!(out, "{}{}", SEPARATOR, EOL)?;
        write!(
            out,
            "elapsed time[s]: {:.2}{}",
            summary.elapsed_ms as f64 / 1000.0,
            EOL
        )?;
        if self.format == ReportFormat::Extended {
            write!(out, "error count: {}{}", summary.error_count, EOL)?;
            if summary.dropped_count > 0 {
                write!(out, "dropped count: {}{}", summary.dropped_count, EOL)?;
            }
        }
        write!(out, "< Received message list >{}{}", EOL, EOL)
    }
}
