//! 24xx serial EEPROM, single-byte word address
//!
//! A write starts an internal programming cycle during which the chip
//! does not acknowledge its address. The driver polls for the
//! acknowledge before returning so back-to-back writes (the two mileage
//! bytes) both land.

use cluster_core::traits::{ByteStore, StoreError};
use cluster_hal::{I2cBus, I2cBusError};

/// Default 7-bit address on DS3231 breakout boards
pub const DEFAULT_ADDRESS: u8 = 0x57;

/// Acknowledge polls before a write is reported failed
const MAX_ACK_POLLS: u16 = 200;

/// EEPROM on an I2C bus
pub struct At24<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> At24<B> {
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }

    /// Wait for the programming cycle to finish
    fn wait_ready(&mut self, word: u8) -> Result<(), StoreError> {
        for _ in 0..MAX_ACK_POLLS {
            match self.bus.write(self.address, &[word]) {
                Ok(()) => return Ok(()),
                Err(I2cBusError::AddressNack) => continue,
                Err(_) => return Err(StoreError::Bus),
            }
        }
        Err(StoreError::Bus)
    }
}

impl<B: I2cBus> ByteStore for At24<B> {
    fn read(&mut self, address: u8) -> Result<u8, StoreError> {
        self.bus
            .read_register(self.address, address)
            .map_err(|_| StoreError::Bus)
    }

    fn write(&mut self, address: u8, value: u8) -> Result<(), StoreError> {
        self.bus
            .write_register(self.address, address, value)
            .map_err(|_| StoreError::Bus)?;
        self.wait_ready(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// EEPROM that stays busy for a few polls after each write
    struct Chip {
        cells: [u8; 256],
        pointer: u8,
        busy_polls: u16,
        busy: u16,
        polls: u16,
    }

    impl Chip {
        fn new(busy_polls: u16) -> Self {
            Self {
                cells: [0xFF; 256],
                pointer: 0,
                busy_polls,
                busy: 0,
                polls: 0,
            }
        }
    }

    impl I2cBus for Chip {
        fn write(&mut self, _address: u8, data: &[u8]) -> Result<(), I2cBusError> {
            if self.busy > 0 {
                self.busy -= 1;
                self.polls += 1;
                return Err(I2cBusError::AddressNack);
            }
            let (word, values) = data.split_first().ok_or(I2cBusError::Bus)?;
            self.pointer = *word;
            if let Some(value) = values.first() {
                self.cells[self.pointer as usize] = *value;
                self.busy = self.busy_polls;
            }
            Ok(())
        }

        fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<(), I2cBusError> {
            for byte in buf.iter_mut() {
                *byte = self.cells[self.pointer as usize];
                self.pointer = self.pointer.wrapping_add(1);
            }
            Ok(())
        }

        fn write_read(
            &mut self,
            address: u8,
            write_data: &[u8],
            read_buf: &mut [u8],
        ) -> Result<(), I2cBusError> {
            self.write(address, write_data)?;
            self.read(address, read_buf)
        }
    }

    #[test]
    fn test_blank_reads_ff() {
        let mut eeprom = At24::new(Chip::new(0), DEFAULT_ADDRESS);
        assert_eq!(eeprom.read(4).unwrap(), 0xFF);
    }

    #[test]
    fn test_write_waits_for_programming() {
        let mut eeprom = At24::new(Chip::new(5), DEFAULT_ADDRESS);
        eeprom.write(4, 0x2C).unwrap();
        eeprom.write(5, 0x01).unwrap();
        assert_eq!(eeprom.bus.polls, 10);
        assert_eq!(eeprom.read(4).unwrap(), 0x2C);
        assert_eq!(eeprom.read(5).unwrap(), 0x01);
    }

    #[test]
    fn test_stuck_chip_reports_error() {
        let mut eeprom = At24::new(Chip::new(u16::MAX), DEFAULT_ADDRESS);
        assert_eq!(eeprom.write(0, 0x43), Err(StoreError::Bus));
    }
}
