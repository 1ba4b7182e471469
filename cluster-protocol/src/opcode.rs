//! Opcode encoding and decoding

use crate::bucket::SpeedBucket;
use crate::signal::{Proximity, TurnSignal};

/// Byte seen on an idle bus; never a command
pub const IDLE_BYTE: u8 = 0x00;

// Family values (high nibble)
const FAMILY_MILEAGE: u8 = 0x10;
const FAMILY_SPEED_LOW: u8 = 0x30;
const FAMILY_TURN: u8 = 0x40;
const FAMILY_SPEED_HIGH: u8 = 0x50;
const FAMILY_PROXIMITY: u8 = 0x60;
const FAMILY_WATCHDOG: u8 = 0x90;

// Payload values (low nibble)
const MILEAGE_RESET: u8 = 0x0;
const MILEAGE_TICK: u8 = 0x1;
const TURN_RIGHT: u8 = 0x1;
const TURN_LEFT: u8 = 0x2;
const TURN_OFF: u8 = 0x3;
const PROXIMITY_CLEAR: u8 = 0x0;
const PROXIMITY_WARNING: u8 = 0x1;
const WATCHDOG_KEEPALIVE: u8 = 0x1;

/// A command sent from the master to the slave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Clear the trip odometer (0x10)
    TripReset,
    /// One more mile travelled (0x11)
    MileageTick,
    /// Current speed bucket (0x30–0x39, 0x50–0x59)
    Speed(SpeedBucket),
    /// Turn signal selection (0x41, 0x42, 0x43)
    Turn(TurnSignal),
    /// Proximity warning state (0x60, 0x61)
    Proximity(Proximity),
    /// Master watchdog keepalive (0x91)
    Keepalive,
}

impl Command {
    /// Decode a received byte
    ///
    /// Returns `None` for the idle byte and for anything outside the opcode
    /// table; the receiver ignores those.
    pub fn decode(byte: u8) -> Option<Self> {
        let payload = byte & 0x0F;

        match byte & 0xF0 {
            FAMILY_MILEAGE => match payload {
                MILEAGE_RESET => Some(Command::TripReset),
                MILEAGE_TICK => Some(Command::MileageTick),
                _ => None,
            },
            FAMILY_SPEED_LOW if payload <= 9 => SpeedBucket::new(payload).map(Command::Speed),
            FAMILY_SPEED_HIGH if payload <= 9 => {
                SpeedBucket::new(10 + payload).map(Command::Speed)
            }
            FAMILY_TURN => Some(Command::Turn(match payload {
                TURN_RIGHT => TurnSignal::Right,
                TURN_LEFT => TurnSignal::Left,
                // Anything else in the family fails safe to off
                _ => TurnSignal::Off,
            })),
            FAMILY_PROXIMITY => match payload {
                PROXIMITY_CLEAR => Some(Command::Proximity(Proximity::Clear)),
                PROXIMITY_WARNING => Some(Command::Proximity(Proximity::Warning)),
                _ => None,
            },
            FAMILY_WATCHDOG if payload == WATCHDOG_KEEPALIVE => Some(Command::Keepalive),
            _ => None,
        }
    }

    /// Encode to the wire byte
    pub fn encode(self) -> u8 {
        match self {
            Command::TripReset => FAMILY_MILEAGE | MILEAGE_RESET,
            Command::MileageTick => FAMILY_MILEAGE | MILEAGE_TICK,
            Command::Speed(bucket) => {
                let index = bucket.index();
                if index < 10 {
                    FAMILY_SPEED_LOW | index
                } else {
                    FAMILY_SPEED_HIGH | (index - 10)
                }
            }
            Command::Turn(TurnSignal::Right) => FAMILY_TURN | TURN_RIGHT,
            Command::Turn(TurnSignal::Left) => FAMILY_TURN | TURN_LEFT,
            Command::Turn(TurnSignal::Off) => FAMILY_TURN | TURN_OFF,
            Command::Proximity(Proximity::Clear) => FAMILY_PROXIMITY | PROXIMITY_CLEAR,
            Command::Proximity(Proximity::Warning) => FAMILY_PROXIMITY | PROXIMITY_WARNING,
            Command::Keepalive => FAMILY_WATCHDOG | WATCHDOG_KEEPALIVE,
        }
    }

    /// Speed command for a measured speed in mph
    pub fn for_speed(mph: f32) -> Self {
        Command::Speed(SpeedBucket::from_mph(mph))
    }
}
