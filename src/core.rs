//! Constants shared by the transport layer and the monitor.

/// Largest payload carried by a CAN-FD frame.
pub const MAX_FD_PAYLOAD: usize = 64;

/// Number of distinct identifiers the default registry can track.
pub const REGISTRY_CAPACITY: usize = 20;

/// Default interval between two drains of the frame source (ms).
pub const UPDATE_DURATION_MS: u32 = 50;

/// Default interval between two traffic reports (ms).
pub const LOG_DURATION_MS: u32 = 2000;
