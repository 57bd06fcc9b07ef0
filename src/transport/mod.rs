//! CAN-FD transport boundary: the frame model handed over by the transceiver
//! driver, the driver configuration, and the traits the board implements
//! (frame source, clock, delay, interrupt line, liveness indicator).
//!
//! Bus arbitration, bit timing and SPI framing stay inside the driver. The
//! monitor only sees frames once they surface through
//! [`FrameSource::available`](traits::frame_source::FrameSource::available)
//! and [`FrameSource::receive`](traits::frame_source::FrameSource::receive).

pub mod config;
pub mod fd_frame;
pub mod traits;
