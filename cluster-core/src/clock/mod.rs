//! Time-of-day, calendar and clock register encoding
//!
//! The clock chip keeps time in BCD registers, in 12-hour mode. Values are
//! held here as plain integers and converted at the register boundary. No
//! calendar validation is done: February 31st is a legal date as far as the
//! cluster is concerned.

pub mod edit;

pub use edit::{DateField, EditCursor, TimeField};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hour register: 12-hour mode select bit
pub const HOUR_12H_MODE: u8 = 0x40;

/// Hour register: PM bit (12-hour mode)
pub const HOUR_PM: u8 = 0x20;

/// Encode a value 0–99 as packed BCD
pub const fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

/// Decode packed BCD, keeping only the tens bits in `tens_mask`
pub const fn from_bcd(raw: u8, tens_mask: u8) -> u8 {
    ((raw & tens_mask) >> 4) * 10 + (raw & 0x0F)
}

/// Time of day in 12-hour form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeOfDay {
    /// Hour, 1–12
    pub hour: u8,
    /// Minute
    pub minute: u8,
    /// Afternoon
    pub pm: bool,
}

impl TimeOfDay {
    /// Decode the minute and hour registers
    ///
    /// Handles a clock left in 24-hour mode by folding it to 12-hour form.
    pub fn from_registers(minute: u8, hour: u8) -> Self {
        let minute = from_bcd(minute, 0x70);
        if hour & HOUR_12H_MODE != 0 {
            return Self {
                hour: from_bcd(hour, 0x10),
                minute,
                pm: hour & HOUR_PM != 0,
            };
        }

        let hour24 = from_bcd(hour, 0x30);
        let hour = match hour24 % 12 {
            0 => 12,
            h => h,
        };
        Self {
            hour,
            minute,
            pm: hour24 >= 12,
        }
    }

    /// Minute register value
    pub fn minute_register(&self) -> u8 {
        to_bcd(self.minute)
    }

    /// Hour register value (12-hour mode)
    pub fn hour_register(&self) -> u8 {
        let pm = if self.pm { HOUR_PM } else { 0 };
        HOUR_12H_MODE | pm | to_bcd(self.hour)
    }

    /// "AM" or "PM"
    pub fn meridiem(&self) -> &'static str {
        if self.pm {
            "PM"
        } else {
            "AM"
        }
    }
}

impl Default for TimeOfDay {
    fn default() -> Self {
        Self {
            hour: 12,
            minute: 0,
            pm: false,
        }
    }
}

/// Calendar date, two-digit year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarDate {
    /// Month, 1–12
    pub month: u8,
    /// Day of month, 1–31
    pub day: u8,
    /// Year within the century, 1–99
    pub year: u8,
}

impl CalendarDate {
    /// Decode the date, month and year registers
    pub fn from_registers(date: u8, month: u8, year: u8) -> Self {
        Self {
            month: from_bcd(month, 0x10),
            day: from_bcd(date, 0x30),
            year: from_bcd(year, 0xF0),
        }
    }

    /// Date, month and year register values
    pub fn registers(&self) -> [u8; 3] {
        [to_bcd(self.day), to_bcd(self.month), to_bcd(self.year)]
    }
}

impl Default for CalendarDate {
    fn default() -> Self {
        Self {
            month: 1,
            day: 1,
            year: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcd() {
        assert_eq!(to_bcd(59), 0x59);
        assert_eq!(to_bcd(7), 0x07);
        assert_eq!(from_bcd(0x59, 0x70), 59);
    }

    #[test]
    fn test_hour_register_am_pm() {
        let am = TimeOfDay {
            hour: 9,
            minute: 5,
            pm: false,
        };
        assert_eq!(am.hour_register(), 0x49);
        assert_eq!(am.minute_register(), 0x05);

        let pm = TimeOfDay {
            hour: 11,
            minute: 30,
            pm: true,
        };
        assert_eq!(pm.hour_register(), 0x71);
    }

    #[test]
    fn test_decode_12h_registers() {
        let time = TimeOfDay::from_registers(0x42, 0x71);
        assert_eq!(
            time,
            TimeOfDay {
                hour: 11,
                minute: 42,
                pm: true
            }
        );
        assert_eq!(TimeOfDay::from_registers(0x00, 0x49).meridiem(), "AM");
    }

    #[test]
    fn test_decode_24h_registers() {
        assert_eq!(TimeOfDay::from_registers(0x15, 0x23).hour, 11);
        assert!(TimeOfDay::from_registers(0x15, 0x23).pm);
        assert_eq!(TimeOfDay::from_registers(0x15, 0x00).hour, 12);
        assert!(!TimeOfDay::from_registers(0x15, 0x00).pm);
    }

    #[test]
    fn test_date_registers() {
        let date = CalendarDate::from_registers(0x31, 0x12, 0x99);
        assert_eq!(
            date,
            CalendarDate {
                month: 12,
                day: 31,
                year: 99
            }
        );
        assert_eq!(date.registers(), [0x31, 0x12, 0x99]);
    }
}
