//! Clock and date edit sub-mode
//!
//! The encoder switch walks a cursor across three fields and then commits:
//!
//! ```text
//! Time: Idle -> Hour   -> Minute -> AM/PM -> Commit -> Idle
//! Date: Idle -> Month  -> Day    -> Year  -> Commit -> Idle
//! ```
//!
//! Rotation adjusts the field under the cursor. Each field wraps within its
//! own range; minutes run 1–59, never showing :00 while editing.

use super::{CalendarDate, TimeOfDay};

/// Edit cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditCursor {
    /// Not editing
    #[default]
    Idle,
    /// First field (hour or month)
    First,
    /// Second field (minute or day)
    Second,
    /// Third field (AM/PM or year)
    Third,
    /// Write the edited value to the clock
    Commit,
}

impl EditCursor {
    /// Move to the next position, holding at Commit
    pub fn advance(self) -> Self {
        match self {
            EditCursor::Idle => EditCursor::First,
            EditCursor::First => EditCursor::Second,
            EditCursor::Second => EditCursor::Third,
            EditCursor::Third | EditCursor::Commit => EditCursor::Commit,
        }
    }

    /// Numeric position (0 = idle, 4 = commit)
    pub fn index(self) -> u8 {
        match self {
            EditCursor::Idle => 0,
            EditCursor::First => 1,
            EditCursor::Second => 2,
            EditCursor::Third => 3,
            EditCursor::Commit => 4,
        }
    }

    /// Returns true while a field is selected
    pub fn is_editing(self) -> bool {
        matches!(
            self,
            EditCursor::First | EditCursor::Second | EditCursor::Third
        )
    }

    /// Time field under the cursor
    pub fn time_field(self) -> Option<TimeField> {
        match self {
            EditCursor::First => Some(TimeField::Hour),
            EditCursor::Second => Some(TimeField::Minute),
            EditCursor::Third => Some(TimeField::Meridiem),
            _ => None,
        }
    }

    /// Date field under the cursor
    pub fn date_field(self) -> Option<DateField> {
        match self {
            EditCursor::First => Some(DateField::Month),
            EditCursor::Second => Some(DateField::Day),
            EditCursor::Third => Some(DateField::Year),
            _ => None,
        }
    }
}

/// Editable time fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeField {
    Hour,
    Minute,
    Meridiem,
}

/// Editable date fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DateField {
    Month,
    Day,
    Year,
}

/// Step `value` by `steps` within `min..=max`, wrapping at both ends
///
/// A value outside the range (a clock reading of :00) enters it at `min`
/// going up and at `max` going down.
pub fn cycle(value: u8, steps: i16, min: u8, max: u8) -> u8 {
    let mut value = value;
    for _ in 0..steps.unsigned_abs() {
        value = if steps > 0 {
            if value >= max || value < min {
                min
            } else {
                value + 1
            }
        } else if value <= min || value > max {
            max
        } else {
            value - 1
        };
    }
    value
}

impl TimeOfDay {
    /// Adjust one field by `steps` detents
    pub fn adjust(&mut self, field: TimeField, steps: i16) {
        match field {
            TimeField::Hour => self.hour = cycle(self.hour, steps, 1, 12),
            TimeField::Minute => self.minute = cycle(self.minute, steps, 1, 59),
            TimeField::Meridiem => {
                if steps.rem_euclid(2) == 1 {
                    self.pm = !self.pm;
                }
            }
        }
    }
}

impl CalendarDate {
    /// Adjust one field by `steps` detents
    pub fn adjust(&mut self, field: DateField, steps: i16) {
        match field {
            DateField::Month => self.month = cycle(self.month, steps, 1, 12),
            DateField::Day => self.day = cycle(self.day, steps, 1, 31),
            DateField::Year => self.year = cycle(self.year, steps, 1, 99),
        }
    }
}
