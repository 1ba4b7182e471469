//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in cluster-core, written against the cluster-hal pin and bus traits:
//!
//! - Unipolar stepper coils (ULN2003-style, four GPIOs)
//! - MAX7219 eight-digit seven-segment display (SPI)
//! - ILI9341 TFT panel with a 5x7 font (SPI)
//! - DS3231 real-time clock (I2C)
//! - 24xx EEPROM with single-byte addressing (I2C)
//! - I2C command link to the slave MCU
//! - GPIO turn and warning lamps

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod display;
pub mod font;
pub mod lamp;
pub mod link;
pub mod store;
pub mod stepper;
pub mod tft;
