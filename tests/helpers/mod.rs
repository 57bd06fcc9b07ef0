/// Test doubles simulating the transceiver driver and the board clock.
use core::cell::Cell;
use std::collections::VecDeque;

use embedded_can::StandardId;
use korri_fdmon::error::ConfigurationError;
use korri_fdmon::transport::{
    config::SourceConfig,
    fd_frame::FdFrame,
    traits::{clock::Clock, frame_source::FrameSource},
};

#[allow(dead_code)]
/// Millisecond clock moved by hand.
pub struct ManualClock(Cell<u32>);

#[allow(dead_code)]
impl ManualClock {
    pub fn at(millis: u32) -> Self {
        Self(Cell::new(millis))
    }

    pub fn set(&self, millis: u32) {
        self.0.set(millis);
    }

    pub fn advance(&self, millis: u32) {
        self.0.set(self.0.get().wrapping_add(millis));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u32 {
        self.0.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Receive failure reported by the simulated driver.
pub struct DecodeError;

#[derive(Default)]
#[allow(dead_code)]
/// In-memory driver: frames put on the wire are decoded by `poll`.
pub struct SimulatedBus {
    wire: VecDeque<Result<FdFrame, DecodeError>>,
    decoded: VecDeque<Result<FdFrame, DecodeError>>,
    pub polls: u32,
    pub reject_with: Option<u32>,
    pub config: Option<SourceConfig>,
}

#[allow(dead_code)]
impl SimulatedBus {
    /// Driver refusing any configuration with `code`.
    pub fn rejecting(code: u32) -> Self {
        Self {
            reject_with: Some(code),
            ..Default::default()
        }
    }

    pub fn push(&mut self, raw: u16, payload: &[u8]) {
        let frame = FdFrame::new(StandardId::new(raw).unwrap(), payload).unwrap();
        self.wire.push_back(Ok(frame));
    }

    pub fn push_corrupted(&mut self) {
        self.wire.push_back(Err(DecodeError));
    }

    pub fn pending(&self) -> usize {
        self.wire.len() + self.decoded.len()
    }
}

impl FrameSource for SimulatedBus {
    type Error = DecodeError;

    fn initialize(&mut self, config: &SourceConfig) -> Result<(), ConfigurationError> {
        if let Some(code) = self.reject_with {
            return Err(ConfigurationError { code });
        }
        self.config = Some(*config);
        Ok(())
    }

    fn poll(&mut self) {
        self.polls += 1;
        self.decoded.extend(self.wire.drain(..));
    }

    fn available(&mut self) -> bool {
        !self.decoded.is_empty()
    }

    fn receive(&mut self) -> Result<FdFrame, Self::Error> {
        self.decoded.pop_front().unwrap_or(Err(DecodeError))
    }
}
