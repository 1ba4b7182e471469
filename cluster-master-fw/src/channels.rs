//! Inter-task communication
//!
//! Edge and tick requests go through the lock-free [`PanelRequests`] the
//! orchestrator consumes. Sensor tasks publish their latest reading on a
//! `Signal`; the controller picks up whatever changed since its last pass.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use cluster_core::orchestrator::PanelRequests;
use cluster_core::sensor::BacklightLevel;
use cluster_protocol::Proximity;

/// Button edges, encoder detents and display ticks
pub static REQUESTS: PanelRequests = PanelRequests::new();

/// Latest road speed in mph (updated by the hall task)
pub static SPEED: Signal<CriticalSectionRawMutex, f32> = Signal::new();

/// Latest proximity state (updated by the sonar task)
pub static PROXIMITY: Signal<CriticalSectionRawMutex, Proximity> = Signal::new();

/// Latest backlight level (updated by the light task)
pub static BACKLIGHT: Signal<CriticalSectionRawMutex, BacklightLevel> = Signal::new();
