//! Configuration types
//!
//! Board-agnostic tuning values. Both firmware images build
//! [`ClusterConfig::default()`] at boot and hand each section to the task
//! that needs it.

pub mod types;

pub use types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete cluster configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterConfig {
    /// Tick periods and timeouts
    pub timing: TimingConfig,
    /// Bus addresses
    pub bus: BusConfig,
    /// Needle scaling
    pub gauge: GaugeConfig,
    /// Sensor conversion constants
    pub sensor: SensorConfig,
    /// Input and display behaviour
    pub ui: UiConfig,
}
