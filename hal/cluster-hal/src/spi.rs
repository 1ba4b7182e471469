//! SPI bus abstractions
//!
//! Both SPI devices in the cluster (the MAX7219 digit driver and the
//! ILI9341 TFT) are write-only and latch on the rising edge of chip select.

/// Error from SPI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiError {
    /// Bus transfer failed
    Transfer,
}

/// Write-only SPI device
///
/// Each call is one chip-select framed transaction.
pub trait SpiWrite {
    /// Write a frame with chip select asserted for its whole length
    fn write_frame(&mut self, data: &[u8]) -> Result<(), SpiError>;
}
