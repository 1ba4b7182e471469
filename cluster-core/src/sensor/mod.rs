//! Sensor conversion
//!
//! Turns raw timer captures and ADC counts into the quantities the
//! orchestrator acts on. Implausible readings are discarded and the
//! previous value is kept; nothing here ever fails.

pub mod light;
pub mod sonar;
pub mod speed;

pub use light::BacklightLevel;
pub use sonar::Sonar;
pub use speed::SpeedSensor;

use cluster_protocol::Proximity;

/// One loop iteration's view of the sensors
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorSnapshot {
    /// Vehicle speed in mph
    pub mph: f32,
    /// Rear proximity state
    pub proximity: Proximity,
    /// Backlight level for the ambient light
    pub backlight: BacklightLevel,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            mph: 0.0,
            proximity: Proximity::Clear,
            backlight: BacklightLevel::Full,
        }
    }
}
