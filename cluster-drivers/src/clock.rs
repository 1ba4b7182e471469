//! DS3231 real-time clock
//!
//! Timekeeping registers are BCD; decoding lives in `cluster_core::clock`.
//! The driver only moves register blocks over the bus.
//!
//! ```text
//! 0x00 seconds   0x03 weekday   0x06 year
//! 0x01 minutes   0x04 date      0x11 temperature, integer part
//! 0x02 hours     0x05 month
//! ```

use cluster_core::clock::{CalendarDate, TimeOfDay};
use cluster_core::traits::{ClockError, ClockService};
use cluster_hal::I2cBus;

/// DS3231 register addresses
pub mod reg {
    pub const SECONDS: u8 = 0x00;
    pub const MINUTES: u8 = 0x01;
    pub const HOURS: u8 = 0x02;
    pub const DATE: u8 = 0x04;
    pub const MONTH: u8 = 0x05;
    pub const YEAR: u8 = 0x06;
    /// Temperature MSB, two's complement °C
    pub const TEMP_MSB: u8 = 0x11;
}

/// Default 7-bit address
pub const DEFAULT_ADDRESS: u8 = 0x68;

/// DS3231 on an I2C bus
pub struct Ds3231<B> {
    bus: B,
    address: u8,
}

impl<B: I2cBus> Ds3231<B> {
    pub fn new(bus: B, address: u8) -> Self {
        Self { bus, address }
    }
}

impl<B: I2cBus> ClockService for Ds3231<B> {
    fn read_time(&mut self) -> Result<TimeOfDay, ClockError> {
        let mut regs = [0u8; 2];
        self.bus
            .read_registers(self.address, reg::MINUTES, &mut regs)
            .map_err(|_| ClockError::Bus)?;
        Ok(TimeOfDay::from_registers(regs[0], regs[1]))
    }

    fn read_date(&mut self) -> Result<CalendarDate, ClockError> {
        let mut regs = [0u8; 3];
        self.bus
            .read_registers(self.address, reg::DATE, &mut regs)
            .map_err(|_| ClockError::Bus)?;
        Ok(CalendarDate::from_registers(regs[0], regs[1], regs[2]))
    }

    fn read_temperature(&mut self) -> Result<i8, ClockError> {
        self.bus
            .read_register(self.address, reg::TEMP_MSB)
            .map(|raw| raw as i8)
            .map_err(|_| ClockError::Bus)
    }

    fn write_time(&mut self, time: &TimeOfDay) -> Result<(), ClockError> {
        self.bus
            .write(
                self.address,
                &[reg::MINUTES, time.minute_register(), time.hour_register()],
            )
            .map_err(|_| ClockError::Bus)
    }

    fn write_date(&mut self, date: &CalendarDate) -> Result<(), ClockError> {
        let [day, month, year] = date.registers();
        self.bus
            .write(self.address, &[reg::DATE, day, month, year])
            .map_err(|_| ClockError::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cluster_hal::I2cBusError;

    /// DS3231 register file
    struct Registers {
        regs: [u8; 0x13],
        pointer: usize,
        online: bool,
    }

    impl Registers {
        fn new() -> Self {
            Self {
                regs: [0; 0x13],
                pointer: 0,
                online: true,
            }
        }
    }

    impl I2cBus for Registers {
        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), I2cBusError> {
            if !self.online || address != DEFAULT_ADDRESS {
                return Err(I2cBusError::AddressNack);
            }
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
    fn test_read_time_12h() {
        let mut bus = Registers::new();
        bus.regs[reg::MINUTES as usize] = 0x45;
        bus.regs[reg::HOURS as usize] = 0x40 | 0x20 | 0x11;
        let mut rtc = Ds3231::new(bus, DEFAULT_ADDRESS);

        let time = rtc.read_time().unwrap();
        assert_eq!(
            time,
            TimeOfDay {
                hour: 11,
                minute: 45,
                pm: true
            }
        );
    }

    #[test]
    fn test_write_time_sets_12h_mode() {
        let mut rtc = Ds3231::new(Registers::new(), DEFAULT_ADDRESS);
        rtc.write_time(&TimeOfDay {
            hour: 7,
            minute: 5,
            pm: false,
        })
        .unwrap();
        assert_eq!(rtc.bus.regs[reg::MINUTES as usize], 0x05);
        assert_eq!(rtc.bus.regs[reg::HOURS as usize], 0x47);
        assert_eq!(rtc.bus.regs[reg::SECONDS as usize], 0x00);
    }

    #[test]
    fn test_date_registers() {
        let mut rtc = Ds3231::new(Registers::new(), DEFAULT_ADDRESS);
        let date = CalendarDate {
            month: 12,
            day: 31,
            year: 99,
        };
        rtc.write_date(&date).unwrap();
        assert_eq!(&rtc.bus.regs[4..7], &[0x31, 0x12, 0x99]);
        assert_eq!(rtc.read_date().unwrap(), date);
    }

    #[test]
    fn test_negative_temperature() {
        let mut bus = Registers::new();
        bus.regs[reg::TEMP_MSB as usize] = 0xF6;
        let mut rtc = Ds3231::new(bus, DEFAULT_ADDRESS);
        assert_eq!(rtc.read_temperature().unwrap(), -10);
    }

    #[test]
    fn test_bus_error() {
        let mut bus = Registers::new();
        bus.online = false;
        let mut rtc = Ds3231::new(bus, DEFAULT_ADDRESS);
        assert_eq!(rtc.read_time(), Err(ClockError::Bus));
    }
}
