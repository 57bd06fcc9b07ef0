//! Narrow view of the CAN-FD transceiver driver. Allows the monitor to run on
//! top of any driver (SPI controller, on-chip FDCAN, simulated bus).
use crate::error::ConfigurationError;
use crate::transport::{config::SourceConfig, fd_frame::FdFrame};

/// Non-blocking frame reception contract.
pub trait FrameSource {
    type Error: core::fmt::Debug;

    /// Configure bit rate, timing, buffer sizing and operating mode.
    fn initialize(&mut self, config: &SourceConfig) -> Result<(), ConfigurationError>;

    /// Advance the driver's reception state machine. Must never block.
    fn poll(&mut self);

    /// Whether at least one decoded frame is queued.
    fn available(&mut self) -> bool;

    /// Dequeue one frame. Fails when the driver could not decode or deliver it.
    fn receive(&mut self) -> Result<FdFrame, Self::Error>;
}
