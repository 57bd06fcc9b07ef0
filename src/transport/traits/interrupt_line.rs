//! Interrupt-ready signal gating the acquisition step.
//!
//! Boards wiring the controller's interrupt pin only poll the driver when an
//! interrupt is pending. Boards without it poll on every loop iteration.
use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};

/// Source of "frame activity pending" notifications.
pub trait InterruptLine {
    /// Returns `true` (and clears the notification) when the driver must be polled.
    fn take_pending(&mut self) -> bool;
}

/// No interrupt wiring: the driver is polled on every iteration.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInterruptLine;

impl InterruptLine for NoInterruptLine {
    #[inline]
    fn take_pending(&mut self) -> bool {
        true
    }
}

// The ISR raises the signal with `signal(())`; the loop consumes it here.
impl<M: RawMutex> InterruptLine for &Signal<M, ()> {
    fn take_pending(&mut self) -> bool {
        self.try_take().is_some()
    }
}
