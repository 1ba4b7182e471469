//! Adapters from `embedded-hal` 1.0
//!
//! embassy-stm32 implements the `embedded-hal` 1.0 traits for its blocking
//! GPIO, I2C and SPI drivers. Wrapping one in [`Compat`] makes it usable by
//! the cluster drivers. Shared I2C handles and chip-selected SPI devices
//! come from `embedded-hal-bus` (`i2c::RefCellDevice`,
//! `spi::ExclusiveDevice`) and are wrapped the same way.

use embedded_hal::digital::{InputPin as EhInputPin, StatefulOutputPin};
use embedded_hal::i2c::{Error as _, I2c};
use embedded_hal::spi::SpiDevice;

use crate::gpio::{InputPin, OutputPin};
use crate::i2c::{I2cBus, I2cBusError};
use crate::spi::{SpiError, SpiWrite};

/// Wrapper giving an `embedded-hal` pin, bus or device the cluster traits
#[derive(Debug)]
pub struct Compat<T>(pub T);

impl<P: StatefulOutputPin> OutputPin for Compat<P> {
    fn set_high(&mut self) {
        // GPIO writes are infallible on the supported chips
        let _ = self.0.set_high();
    }

    fn set_low(&mut self) {
        let _ = self.0.set_low();
    }

    fn is_set_high(&mut self) -> bool {
        self.0.is_set_high().unwrap_or(false)
    }
}

impl<P: EhInputPin> InputPin for Compat<P> {
    fn is_high(&mut self) -> bool {
        // A failed read counts as released (pulled up)
        self.0.is_high().unwrap_or(true)
    }
}

impl<B: I2c> I2cBus for Compat<B> {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cBusError> {
        self.0.write(address, data).map_err(|e| e.kind().into())
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), I2cBusError> {
        self.0.read(address, buf).map_err(|e| e.kind().into())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), I2cBusError> {
        self.0
            .write_read(address, write_data, read_buf)
            .map_err(|e| e.kind().into())
    }
}

/// One frame is one `SpiDevice` transaction, so chip select frames it
impl<D: SpiDevice> SpiWrite for Compat<D> {
    fn write_frame(&mut self, data: &[u8]) -> Result<(), SpiError> {
        self.0.write(data).map_err(|_| SpiError::Transfer)
    }
}
