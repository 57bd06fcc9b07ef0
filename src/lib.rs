//! `korri-fdmon` library: a listen-only CAN-FD bus monitor for `no_std`
//! targets. Frames drained from a transceiver driver are folded into a
//! fixed-capacity registry keyed by identifier, and a human-readable traffic
//! report (length, rate, payload, age) is emitted at a fixed cadence.
#![no_std]
//==================================================================================
/// Shared constants: payload limits, registry capacity, default cadences.
pub mod core;
/// Error types for frame construction, driver configuration and the registry.
pub mod error;
/// Observation registry, reporter and the cooperative scheduler.
pub mod monitor;
/// CAN-FD frame model and the capabilities expected from the board.
pub mod transport;
//==================================================================================
