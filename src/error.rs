//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (frame construction,
//! driver configuration, registry capacity).
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while building a CAN-FD frame.
pub enum FrameError {
    /// Payload exceeds the 64 bytes a CAN-FD frame can carry.
    #[error("Payload too long: {len} bytes")]
    PayloadTooLong { len: usize },
    /// Length cannot be expressed by a CAN-FD data length code.
    #[error("No CAN-FD DLC encodes {len} bytes")]
    InvalidLength { len: usize },
    /// Data length code outside of 0..=15.
    #[error("Invalid DLC: {dlc}")]
    InvalidDlc { dlc: u8 },
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// The transceiver driver refused the requested configuration.
#[error("Configuration error 0x{code:x}")]
pub struct ConfigurationError {
    /// Driver-specific, non-zero error code.
    pub code: u32,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors surfaced by the observation registry.
pub enum RegistryError {
    /// Every slot already tracks an identifier.
    #[error("Registry full")]
    Full,
    /// Slot index does not exist in this registry.
    #[error("Slot {slot} out of range")]
    SlotOutOfRange { slot: usize },
}
