//! Observation registry: a fixed pool of per-identifier records.
//!
//! Slots are addressed by position, not by identifier value. Insertion is
//! first-fit, identifiers are never evicted, and once every slot is occupied
//! frames carrying a new identifier are dropped without touching the tracked
//! ones.
use embedded_can::{Id, StandardId};

use crate::{core::MAX_FD_PAYLOAD, error::RegistryError, transport::fd_frame::FdFrame};

//==================================================================================Record
/// Last known state and counters for one bus identifier.
#[derive(Debug, Clone, Copy)]
pub struct ObservedRecord {
    identifier: Id,
    len: usize,
    payload: [u8; MAX_FD_PAYLOAD],
    last_received_at: u32,
    total_count: u64,
    count_at_last_report: u64,
    occupied: bool,
}

impl ObservedRecord {
    /// Free slot.
    const fn vacant() -> Self {
        Self {
            identifier: Id::Standard(StandardId::ZERO),
            len: 0,
            payload: [0; MAX_FD_PAYLOAD],
            last_received_at: 0,
            total_count: 0,
            count_at_last_report: 0,
            occupied: false,
        }
    }

    pub fn identifier(&self) -> Id {
        self.identifier
    }

    /// Payload length of the most recent frame.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes of the most recent frame.
    pub fn payload(&self) -> &[u8] {
        &self.payload[..self.len]
    }

    /// Clock reading (ms) at the most recent frame.
    pub fn last_received_at(&self) -> u32 {
        self.last_received_at
    }

    /// Frames received since the record was created.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// `total_count` as of the previous report.
    pub fn count_at_last_report(&self) -> u64 {
        self.count_at_last_report
    }

    /// Frames received since the previous report.
    pub fn count_since_report(&self) -> u64 {
        self.total_count - self.count_at_last_report
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    /// Snapshot the counter for the next rate computation.
    pub(crate) fn mark_reported(&mut self) {
        self.count_at_last_report = self.total_count;
    }
}

//==================================================================================Registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// What happened to a frame folded into the registry.
pub enum Observation {
    /// Identifier was already tracked in `slot`.
    Updated { slot: usize },
    /// Identifier was new and now occupies `slot`.
    Inserted { slot: usize },
    /// Identifier was new and every slot was taken.
    Dropped,
}

/// Fixed-capacity registry tracking up to `N` identifiers.
#[derive(Debug, Clone)]
pub struct ObservationRegistry<const N: usize> {
    slots: [ObservedRecord; N],
    dropped: u32,
}

impl<const N: usize> Default for ObservationRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ObservationRegistry<N> {
    /// Registry with every slot free.
    pub const fn new() -> Self {
        Self {
            slots: [ObservedRecord::vacant(); N],
            dropped: 0,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Number of tracked identifiers.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.occupied).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.slots.iter().any(|s| s.occupied)
    }

    /// Frames dropped because the registry was full.
    pub fn dropped_count(&self) -> u32 {
        self.dropped
    }

    /// Slot currently tracking `identifier`.
    pub fn find(&self, identifier: Id) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.occupied && s.identifier == identifier)
    }

    /// Lowest-index free slot.
    pub fn allocate(&self) -> Result<usize, RegistryError> {
        self.slots
            .iter()
            .position(|s| !s.occupied)
            .ok_or(RegistryError::Full)
    }

    /// Write `frame` into `slot`, claiming the slot on first use.
    pub fn apply(&mut self, slot: usize, frame: &FdFrame, now: u32) -> Result<(), RegistryError> {
        let record = self
            .slots
            .get_mut(slot)
            .ok_or(RegistryError::SlotOutOfRange { slot })?;

        if !record.occupied {
            record.occupied = true;
            record.identifier = frame.id;
        }

        let payload = frame.payload();
        record.payload[..payload.len()].copy_from_slice(payload);
        record.len = payload.len();
        record.last_received_at = now;
        record.total_count += 1;
        Ok(())
    }

    /// Insert-or-update. Never fails: a full registry drops the frame.
    pub fn observe(&mut self, frame: &FdFrame, now: u32) -> Observation {
        if let Some(slot) = self.find(frame.id) {
            // `slot` comes from `find`, it is in range.
            let _ = self.apply(slot, frame, now);
            return Observation::Updated { slot };
        }

        match self.allocate() {
            Ok(slot) => {
                let _ = self.apply(slot, frame, now);
                Observation::Inserted { slot }
            }
            Err(_) => {
                self.dropped = self.dropped.saturating_add(1);
                Observation::Dropped
            }
        }
    }

    /// Record stored in `slot`, occupied or not.
    pub fn get(&self, slot: usize) -> Option<&ObservedRecord> {
        self.slots.get(slot)
    }

    /// Tracked records in slot order.
    pub fn records(&self) -> impl Iterator<Item = &ObservedRecord> {
        self.slots.iter().filter(|s| s.occupied)
    }

    pub(crate) fn records_mut(&mut self) -> impl Iterator<Item = &mut ObservedRecord> {
        self.slots.iter_mut().filter(|s| s.occupied)
    }
}
