//! I2C bus abstractions
//!
//! The master board shares one I2C bus between the slave MCU (0x32), the
//! EEPROM (0x57) and the DS3231 clock (0x68). All devices on it are
//! register-addressed, so the trait carries register helpers. Sharing is
//! left to `embedded-hal-bus` devices wrapped in [`Compat`](crate::Compat).

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

/// Error from I2C operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cBusError {
    /// Bus error (misplaced start/stop)
    Bus,
    /// Arbitration lost
    ArbitrationLost,
    /// Address byte not acknowledged
    AddressNack,
    /// Data byte not acknowledged
    DataNack,
    /// Receive overrun
    Overrun,
    /// Other error
    Other,
}

impl From<ErrorKind> for I2cBusError {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Bus => I2cBusError::Bus,
            ErrorKind::ArbitrationLoss => I2cBusError::ArbitrationLost,
            ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data) => I2cBusError::DataNack,
            ErrorKind::NoAcknowledge(_) => I2cBusError::AddressNack,
            ErrorKind::Overrun => I2cBusError::Overrun,
            _ => I2cBusError::Other,
        }
    }
}

/// I2C bus master
pub trait I2cBus {
    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cBusError>;

    /// Read data from a device at the given address
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cBusError>;

    /// Write then read in a single transaction (repeated start)
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), I2cBusError>;

    /// Write one register
    fn write_register(&mut self, address: u8, register: u8, value: u8) -> Result<(), I2cBusError> {
        self.write(address, &[register, value])
    }

    /// Read one register
    fn read_register(&mut self, address: u8, register: u8) -> Result<u8, I2cBusError> {
        let mut buf = [0u8; 1];
        self.write_read(address, &[register], &mut buf)?;
        Ok(buf[0])
    }

    /// Read consecutive registers starting at `register`
    ///
    /// Relies on the device auto-incrementing its register pointer.
    fn read_registers(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), I2cBusError> {
        self.write_read(address, &[register], buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Register file that records the last write
    struct RegisterFile {
        regs: [u8; 16],
        pointer: usize,
    }

    impl I2cBus for RegisterFile {
        fn write(&mut self, _address: u8, data: &[u8]) -> Result<(), I2cBusError> {
            let (reg, values) = data.split_first().ok_or(I2cBusError::Bus)?;
            self.pointer = *reg as usize;
            for value in values {
                self.regs[self.pointer] = *value;
                self.pointer += 1;
            }
            Ok(())
        }

        fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<(), I2cBusError> {
            for byte in buf.iter_mut() {
                *byte = self.regs[self.pointer];
                self.pointer += 1;
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
    fn test_register_helpers() {
        let mut bus = RegisterFile {
            regs: [0; 16],
            pointer: 0,
        };
        bus.write_register(0x68, 0x02, 0x47).unwrap();
        assert_eq!(bus.read_register(0x68, 0x02).unwrap(), 0x47);

        bus.write(0x68, &[0x04, 0x15, 0x08, 0x24]).unwrap();
        let mut buf = [0u8; 3];
        bus.read_registers(0x68, 0x04, &mut buf).unwrap();
        assert_eq!(buf, [0x15, 0x08, 0x24]);
    }

    #[test]
    fn test_error_kind_mapping() {
        assert_eq!(
            I2cBusError::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)),
            I2cBusError::AddressNack
        );
        assert_eq!(
            I2cBusError::from(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Data)),
            I2cBusError::DataNack
        );
        assert_eq!(
            I2cBusError::from(ErrorKind::ArbitrationLoss),
            I2cBusError::ArbitrationLost
        );
    }
}
