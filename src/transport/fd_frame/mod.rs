//! In-memory representation of a received CAN-FD frame.
use embedded_can::{Frame, Id, StandardId};

use crate::{core::MAX_FD_PAYLOAD, error::FrameError};

/// Payload length for each 4-bit data length code.
const DLC_TO_LEN: [usize; 16] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 12, 16, 20, 24, 32, 48, 64];

/// Convert a data length code into a payload length.
pub fn dlc_to_len(dlc: u8) -> Result<usize, FrameError> {
    DLC_TO_LEN
        .get(dlc as usize)
        .copied()
        .ok_or(FrameError::InvalidDlc { dlc })
}

/// Convert a payload length into its data length code.
///
/// Only the lengths a CAN-FD controller can put on the wire are accepted.
pub fn len_to_dlc(len: usize) -> Result<u8, FrameError> {
    if len > MAX_FD_PAYLOAD {
        return Err(FrameError::PayloadTooLong { len });
    }
    DLC_TO_LEN
        .iter()
        .position(|&l| l == len)
        .map(|dlc| dlc as u8)
        .ok_or(FrameError::InvalidLength { len })
}

/// Numeric value of a standard or extended identifier.
#[inline]
pub fn raw_id(id: Id) -> u32 {
    match id {
        Id::Standard(std_id) => std_id.as_raw() as u32,
        Id::Extended(ext_id) => ext_id.as_raw(),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Raw CAN-FD frame as delivered by the transceiver driver.
pub struct FdFrame {
    /// Standard (11-bit) or extended (29-bit) arbitration identifier.
    pub id: Id,
    /// Payload buffer. Bytes beyond `len` are undefined.
    pub data: [u8; MAX_FD_PAYLOAD],
    /// Number of valid payload bytes (0 to 64).
    pub len: usize,
}

impl Default for FdFrame {
    fn default() -> Self {
        Self {
            id: Id::Standard(StandardId::ZERO),
            data: [0; MAX_FD_PAYLOAD],
            len: 0,
        }
    }
}

impl FdFrame {
    /// Build a frame, copying `payload` into the fixed buffer.
    pub fn new(id: impl Into<Id>, payload: &[u8]) -> Result<Self, FrameError> {
        len_to_dlc(payload.len())?;
        let mut data = [0u8; MAX_FD_PAYLOAD];
        data[..payload.len()].copy_from_slice(payload);
        Ok(Self {
            id: id.into(),
            data,
            len: payload.len(),
        })
    }

    /// Populated part of the payload buffer.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.len.min(MAX_FD_PAYLOAD)]
    }

    /// Numeric identifier value.
    #[inline]
    pub fn raw_id(&self) -> u32 {
        raw_id(self.id)
    }
}

// CAN-FD has no remote frames; `new_remote` always fails.
impl Frame for FdFrame {
    fn new(id: impl Into<Id>, data: &[u8]) -> Option<Self> {
        FdFrame::new(id, data).ok()
    }

    fn new_remote(_id: impl Into<Id>, _dlc: usize) -> Option<Self> {
        None
    }

    fn is_extended(&self) -> bool {
        matches!(self.id, Id::Extended(_))
    }

    fn is_remote_frame(&self) -> bool {
        false
    }

    fn id(&self) -> Id {
        self.id
    }

    fn dlc(&self) -> usize {
        len_to_dlc(self.len).map(usize::from).unwrap_or(0)
    }

    fn data(&self) -> &[u8] {
        self.payload()
    }
}
