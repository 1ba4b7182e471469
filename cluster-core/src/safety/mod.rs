//! Safety monitoring
//!
//! The master MCU is guarded by its hardware independent watchdog; the slave
//! watches the master's keepalive opcodes with the same window model and
//! holds its indicators safe while they are missing.

pub mod link;
pub mod watchdog;

pub use link::{LinkEvent, LinkMonitor};
pub use watchdog::{Watchdog, WatchdogStatus};
