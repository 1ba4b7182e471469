//! Real-time clock service

use crate::clock::{CalendarDate, TimeOfDay};

/// Errors from the clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Device did not respond
    Bus,
}

/// Battery-backed clock with a die temperature sensor
pub trait ClockService {
    /// Read the time of day
    fn read_time(&mut self) -> Result<TimeOfDay, ClockError>;

    /// Read the calendar date
    fn read_date(&mut self) -> Result<CalendarDate, ClockError>;

    /// Read the temperature in whole °C
    fn read_temperature(&mut self) -> Result<i8, ClockError>;

    /// Set the time of day (seconds are left running)
    fn write_time(&mut self, time: &TimeOfDay) -> Result<(), ClockError>;

    /// Set the calendar date
    fn write_date(&mut self, date: &CalendarDate) -> Result<(), ClockError>;
}
