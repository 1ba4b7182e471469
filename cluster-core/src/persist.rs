//! Persisted record layout and trip odometer
//!
//! The master keeps a handful of bytes in the EEPROM:
//!
//! ```text
//! ┌──────┬──────────────────────────────────┐
//! │ addr │ contents                         │
//! ├──────┼──────────────────────────────────┤
//! │ 0    │ last turn-signal opcode          │
//! │ 1    │ dashboard state                  │
//! │ 2    │ bluetooth enable (1 = on)        │
//! │ 4    │ trip miles, low byte             │
//! │ 5    │ trip miles, carry byte           │
//! └──────┴──────────────────────────────────┘
//! ```
//!
//! A blank EEPROM reads 0xFF everywhere; every field has a safe
//! interpretation of that.

use crate::state::DashboardState;
use crate::traits::{ByteStore, StoreError};

/// Last turn-signal opcode
pub const SLOT_TURN: u8 = 0;
/// Dashboard state
pub const SLOT_STATE: u8 = 1;
/// Bluetooth enable flag
pub const SLOT_BLUETOOTH: u8 = 2;
/// Trip miles, low byte
pub const SLOT_MILES_LOW: u8 = 4;
/// Trip miles, carry byte
pub const SLOT_MILES_CARRY: u8 = 5;

/// Byte pattern of an erased EEPROM cell
const ERASED: u8 = 0xFF;

/// Everything restored at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistedRecord {
    /// Raw turn-signal opcode (decoded by the caller)
    pub turn_opcode: u8,
    /// Screen to come back to
    pub state: DashboardState,
    /// Bluetooth module enabled
    pub bluetooth: bool,
    /// Whole trip miles
    pub miles: u16,
}

impl PersistedRecord {
    /// Read the record from the store
    pub fn load<S: ByteStore>(store: &mut S) -> Result<Self, StoreError> {
        let turn_opcode = store.read(SLOT_TURN)?;
        let state = DashboardState::from_byte(store.read(SLOT_STATE)?).unwrap_or_default();
        let bluetooth = store.read(SLOT_BLUETOOTH)? == 1;

        let low = store.read(SLOT_MILES_LOW)?;
        let carry = store.read(SLOT_MILES_CARRY)?;
        let miles = if low == ERASED && carry == ERASED {
            0
        } else {
            u16::from_le_bytes([low, carry])
        };

        Ok(Self {
            turn_opcode,
            state,
            bluetooth,
            miles,
        })
    }
}

/// Write the trip miles (low byte and carry byte)
pub fn store_miles<S: ByteStore>(store: &mut S, miles: u16) -> Result<(), StoreError> {
    let [low, carry] = miles.to_le_bytes();
    store.write(SLOT_MILES_LOW, low)?;
    store.write(SLOT_MILES_CARRY, carry)
}

/// Fractional trip distance accumulator
#[derive(Debug, Clone, Default)]
pub struct TripOdometer {
    /// Whole miles
    miles: u16,
    /// Distance since the last whole mile
    fraction: f32,
}

impl TripOdometer {
    /// Start from a restored mileage
    pub fn new(miles: u16) -> Self {
        Self {
            miles,
            fraction: 0.0,
        }
    }

    /// Add the distance covered at `mph` over `seconds`
    ///
    /// Returns the number of whole miles completed by this update.
    pub fn accumulate(&mut self, mph: f32, seconds: f32) -> u8 {
        if mph > 0.0 {
            self.fraction += mph * seconds / 3600.0;
        }

        let mut completed = 0;
        while self.fraction >= 1.0 {
            self.fraction -= 1.0;
            self.miles = self.miles.wrapping_add(1);
            completed += 1;
        }
        completed
    }

    /// Clear the trip
    pub fn reset(&mut self) {
        self.miles = 0;
        self.fraction = 0.0;
    }

    /// Whole trip miles
    pub fn miles(&self) -> u16 {
        self.miles
    }
}
