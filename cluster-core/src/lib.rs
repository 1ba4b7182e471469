//! Board-agnostic core logic for the instrument cluster
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (bus, store, clock, displays, coils, lamps)
//! - Master orchestration loop and dashboard state machine
//! - Sensor conversion (hall speed, sonar proximity, ambient light)
//! - Slave dispatcher, gauge actuator, signal lamp controller and link
//!   fail-safe
//! - Interrupt-to-loop hand-off primitives
//! - Watchdog model and input debouncing
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod dispatch;
pub mod gauge;
pub mod handoff;
pub mod input;
pub mod lamp;
pub mod orchestrator;
pub mod persist;
pub mod safety;
pub mod sensor;
pub mod slave;
pub mod state;
pub mod traits;
