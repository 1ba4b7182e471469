//! Inter-MCU Command Protocol
//!
//! This crate defines the byte protocol the master MCU writes to the slave
//! MCU over I2C (slave address 0x32). Every command is exactly one byte;
//! there is no framing, sequence number, checksum or acknowledgment. A lost
//! byte is simply lost, and the next periodic update overwrites it.
//!
//! # Opcode Layout
//!
//! The high nibble selects the family, the low nibble carries the payload:
//! ```text
//! ┌────────┬────────────────────────────────────────┐
//! │ family │ low nibble                             │
//! ├────────┼────────────────────────────────────────┤
//! │ 0x1_   │ 0 = trip reset, 1 = mileage tick       │
//! │ 0x3_   │ speed bucket 0–9                       │
//! │ 0x4_   │ 1 = right, 2 = left, other = off       │
//! │ 0x5_   │ speed bucket 10–19                     │
//! │ 0x6_   │ 0 = proximity clear, 1 = warning       │
//! │ 0x9_   │ 1 = watchdog keepalive                 │
//! └────────┴────────────────────────────────────────┘
//! ```
//!
//! Both sides share [`Command`] and the [`SPEED_BREAKPOINTS`] table so the
//! encoder and the decoder cannot drift apart.

#![no_std]
#![deny(unsafe_code)]

pub mod bucket;
pub mod opcode;
pub mod signal;

pub use bucket::{SpeedBucket, BUCKET_COUNT, SPEED_BREAKPOINTS};
pub use opcode::{Command, IDLE_BYTE};
pub use signal::{Proximity, TurnSignal};
