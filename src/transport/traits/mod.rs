//! Capabilities the board provides to the monitor (frame source, clock,
//! loop delay, interrupt-ready line, liveness indicator).
pub mod clock;
pub mod frame_source;
pub mod indicator;
pub mod interrupt_line;
pub mod monitor_timer;
