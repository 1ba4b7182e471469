//! MAX7219 eight-digit seven-segment driver
//!
//! Runs the chip in no-decode mode and supplies the segment patterns from a
//! local glyph table. Each register write is one 16-bit SPI frame: the
//! register address followed by the data byte.
//!
//! Digit position 0 is register 0x01.

use cluster_core::traits::{DisplayError, NumericDisplay};
use cluster_hal::SpiWrite;

/// MAX7219 register addresses
pub mod reg {
    /// First digit register; digits are consecutive
    pub const DIGIT_0: u8 = 0x01;
    /// BCD decode mode per digit
    pub const DECODE_MODE: u8 = 0x09;
    /// Brightness, 0–15
    pub const INTENSITY: u8 = 0x0A;
    /// Number of scanned digits minus one
    pub const SCAN_LIMIT: u8 = 0x0B;
    /// Shutdown (0) or normal operation (1)
    pub const SHUTDOWN: u8 = 0x0C;
    /// Display test
    pub const DISPLAY_TEST: u8 = 0x0F;
}

/// Segment patterns for 0–9, bit order DP A B C D E F G
pub const GLYPHS: [u8; 10] = [0x7E, 0x30, 0x6D, 0x79, 0x33, 0x5B, 0x5F, 0x70, 0x7F, 0x7B];

/// Pattern for a blank digit
pub const BLANK: u8 = 0x00;

/// Default brightness (2/16)
pub const DEFAULT_INTENSITY: u8 = 0x02;

/// MAX7219 display
pub struct Max7219<S> {
    spi: S,
}

impl<S: SpiWrite> Max7219<S> {
    pub fn new(spi: S) -> Self {
        Self { spi }
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), DisplayError> {
        self.spi
            .write_frame(&[register, value])
            .map_err(|_| DisplayError::Bus)
    }

    /// Bring the chip out of shutdown showing all zeros
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.write_register(reg::DISPLAY_TEST, 0x00)?;
        self.write_register(reg::DECODE_MODE, 0x00)?;
        self.write_register(reg::INTENSITY, DEFAULT_INTENSITY)?;
        self.write_register(reg::SCAN_LIMIT, Self::DIGITS - 1)?;
        self.write_register(reg::SHUTDOWN, 0x01)?;
        for position in 0..Self::DIGITS {
            self.write_digit(position, Some(0))?;
        }
        Ok(())
    }
}

impl<S: SpiWrite> NumericDisplay for Max7219<S> {
    const DIGITS: u8 = 8;

    fn write_digit(&mut self, position: u8, digit: Option<u8>) -> Result<(), DisplayError> {
        if position >= Self::DIGITS {
            return Err(DisplayError::OutOfBounds);
        }
        let pattern = match digit {
            Some(d) => *GLYPHS.get(d as usize).ok_or(DisplayError::OutOfBounds)?,
            None => BLANK,
        };
        self.write_register(reg::DIGIT_0 + position, pattern)
    }
}
