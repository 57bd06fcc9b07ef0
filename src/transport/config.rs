//! Configuration handed to the transceiver driver at start-up.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Crystal or clock source feeding the CAN-FD controller.
pub enum Oscillator {
    Osc4MHz,
    Osc20MHz,
    Osc40MHz,
}

impl Oscillator {
    /// Frequency in hertz.
    pub const fn hz(self) -> u32 {
        match self {
            Oscillator::Osc4MHz => 4_000_000,
            Oscillator::Osc20MHz => 20_000_000,
            Oscillator::Osc40MHz => 40_000_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Data phase bit rate expressed as a multiple of the arbitration bit rate.
pub enum DataBitRateFactor {
    X1 = 1,
    X2 = 2,
    X4 = 4,
    X8 = 8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Controller operating mode requested from the driver.
pub enum OperatingMode {
    /// Receive only; never transmits nor acknowledges.
    ListenOnly,
    /// Regular CAN-FD participation.
    Normal,
    /// Internal loopback, for bench testing.
    InternalLoopback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Bit rate, timing and buffer sizing requested from the driver.
pub struct SourceConfig {
    pub oscillator: Oscillator,
    /// Arbitration phase bit rate (bit/s).
    pub arbitration_bit_rate: u32,
    pub data_bit_rate_factor: DataBitRateFactor,
    pub mode: OperatingMode,
    /// Driver-side transmit FIFO depth. The monitor never transmits.
    pub transmit_fifo_size: u8,
    /// Driver-side receive FIFO depth.
    pub receive_fifo_size: u8,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::listen_only()
    }
}

impl SourceConfig {
    /// Listen-only setup: 4 MHz oscillator, 125 kbit/s, no transmit buffering.
    pub const fn listen_only() -> Self {
        Self {
            oscillator: Oscillator::Osc4MHz,
            arbitration_bit_rate: 125_000,
            data_bit_rate_factor: DataBitRateFactor::X1,
            mode: OperatingMode::ListenOnly,
            transmit_fifo_size: 0,
            receive_fifo_size: 6,
        }
    }

    pub fn with_oscillator(mut self, oscillator: Oscillator) -> Self {
        self.oscillator = oscillator;
        self
    }

    pub fn with_arbitration_bit_rate(mut self, bit_rate: u32) -> Self {
        self.arbitration_bit_rate = bit_rate;
        self
    }

    pub fn with_data_bit_rate_factor(mut self, factor: DataBitRateFactor) -> Self {
        self.data_bit_rate_factor = factor;
        self
    }

    pub fn with_mode(mut self, mode: OperatingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_receive_fifo_size(mut self, size: u8) -> Self {
        self.receive_fifo_size = size;
        self
    }

    /// Data phase bit rate (bit/s), saturating at `u32::MAX`.
    pub fn data_bit_rate(&self) -> u32 {
        self.arbitration_bit_rate
            .saturating_mul(self.data_bit_rate_factor as u32)
    }
}

//==================================================================================TESTS
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Listen-only defaults match the board setup.
    fn test_listen_only_defaults() {
        let config = SourceConfig::default();
        assert_eq!(config, SourceConfig::listen_only());
        assert_eq!(config.mode, OperatingMode::ListenOnly);
        assert_eq!(config.oscillator.hz(), 4_000_000);
        assert_eq!(config.transmit_fifo_size, 0);
        assert_eq!(config.receive_fifo_size, 6);
        assert_eq!(config.data_bit_rate(), 125_000);
    }

    #[test]
    /// Builder setters override the defaults.
    fn test_builder_setters() {
        let config = SourceConfig::listen_only()
            .with_oscillator(Oscillator::Osc40MHz)
            .with_arbitration_bit_rate(500_000)
            .with_data_bit_rate_factor(DataBitRateFactor::X4)
            .with_mode(OperatingMode::Normal)
            .with_receive_fifo_size(16);
        assert_eq!(config.oscillator.hz(), 40_000_000);
        assert_eq!(Oscillator::Osc20MHz.hz(), 20_000_000);
        assert_eq!(config.mode, OperatingMode::Normal);
        assert_eq!(config.receive_fifo_size, 16);
        assert_eq!(config.data_bit_rate(), 2_000_000);
    }

    #[test]
    /// Data bit rate saturates instead of overflowing.
    fn test_data_bit_rate_saturates() {
        let config = SourceConfig::listen_only()
            .with_arbitration_bit_rate(1_000_000_000)
            .with_data_bit_rate_factor(DataBitRateFactor::X8);
        assert_eq!(config.data_bit_rate(), u32::MAX);
    }
}
