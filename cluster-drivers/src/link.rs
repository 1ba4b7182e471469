//! I2C command link to the slave MCU
//!
//! Each opcode goes out as a two-byte write: the idle byte first, then the
//! opcode. The slave latches the last byte of a transfer and ignores the
//! idle byte, so a transfer that is cut short after the first byte has no
//! effect.

use cluster_core::traits::{BusError, CommandSink};
use cluster_hal::{I2cBus, I2cBusError};
use cluster_protocol::IDLE_BYTE;

/// Default slave address
pub const DEFAULT_ADDRESS: u8 = 0x32;

/// Master side of the link
pub struct I2cLink<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> I2cLink<B> {
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }
}

impl<B: I2cBus> CommandSink for I2cLink<B> {
    fn send(&mut self, opcode: u8) -> Result<(), BusError> {
        self.bus
            .write_register(self.address, IDLE_BYTE, opcode)
            .map_err(|e| match e {
                I2cBusError::AddressNack | I2cBusError::DataNack => BusError::Nack,
                _ => BusError::Bus,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    struct Recorder {
        writes: Vec<(u8, [u8; 2]), 8>,
        error: Option<I2cBusError>,
    }

    impl I2cBus for Recorder {
        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cBusError> {
            if let Some(e) = self.error {
                return Err(e);
            }
            self.writes
                .push((address, [data[0], data[1]]))
                .map_err(|_| I2cBusError::Other)
        }

        fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), I2cBusError> {
            Err(I2cBusError::Other)
        }

        fn write_read(&mut self, _: u8, _: &[u8], _: &mut [u8]) -> Result<(), I2cBusError> {
            Err(I2cBusError::Other)
        }
    }

    #[test]
    fn test_frame_layout() {
        let mut link = I2cLink::new(
            Recorder {
                writes: Vec::new(),
                error: None,
            },
            DEFAULT_ADDRESS,
        );
        link.send(0x91).unwrap();
        assert_eq!(link.bus.writes[0], (0x32, [0x00, 0x91]));
    }

    #[test]
    fn test_error_mapping() {
        let mut link = I2cLink::new(
            Recorder {
                writes: Vec::new(),
                error: Some(I2cBusError::AddressNack),
            },
            DEFAULT_ADDRESS,
        );
        assert_eq!(link.send(0x37), Err(BusError::Nack));

        link.bus.error = Some(I2cBusError::ArbitrationLost);
        assert_eq!(link.send(0x37), Err(BusError::Bus));
    }
}
