//! Dashlink Hardware Abstraction Layer
//!
//! This crate defines the pin and bus capabilities the cluster drivers are
//! written against. Concrete chips are plugged in through [`compat`], which
//! wraps any `embedded-hal` 1.0 implementation (embassy-stm32 on both
//! boards, shared or chip-selected through `embedded-hal-bus`).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  cluster-drivers (stepper, MAX7219, …)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  cluster-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  compat::Compat<embedded-hal 1.0 impl>  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`i2c::I2cBus`] - I2C master with register helpers
//! - [`spi::SpiWrite`] - Write-only SPI with chip select

#![no_std]
#![deny(unsafe_code)]

pub mod compat;
pub mod gpio;
pub mod i2c;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use compat::Compat;
pub use gpio::{InputPin, OutputPin};
pub use i2c::{I2cBus, I2cBusError};
pub use spi::{SpiError, SpiWrite};
