//! Liveness indicator toggled on every drained frame (typically a LED).

pub trait Indicator {
    fn toggle(&mut self);
}

/// Board without an indicator.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoIndicator;

impl Indicator for NoIndicator {
    #[inline]
    fn toggle(&mut self) {}
}
