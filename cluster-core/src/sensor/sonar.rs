//! Ultrasonic proximity
//!
//! The rear sonar reports an echo pulse width in microseconds.

use cluster_protocol::Proximity;

use crate::config::SensorConfig;

/// Speed of sound in cm/µs
const SOUND_CM_PER_US: f32 = 0.034;

/// Centimetres per inch as calibrated on the bumper mount
const CM_PER_INCH: f32 = 2.5;

/// Mount offset subtracted from every reading (inches)
const MOUNT_OFFSET_IN: f32 = 1.0;

/// Convert an echo pulse width to inches, before plausibility filtering
pub fn raw_inches(echo_us: f32) -> f32 {
    let cm = SOUND_CM_PER_US * echo_us / 2.0;
    cm / CM_PER_INCH - MOUNT_OFFSET_IN
}

/// Filtered proximity sensor
#[derive(Debug, Clone)]
pub struct Sonar {
    threshold_in: f32,
    max_range_in: f32,
    distance_in: f32,
}

impl Sonar {
    /// Create a sensor reading "nothing in range"
    pub fn new(config: &SensorConfig) -> Self {
        Self {
            threshold_in: config.proximity_threshold_in,
            max_range_in: config.max_range_in,
            distance_in: config.max_range_in,
        }
    }

    /// Record an echo pulse width, returning the filtered distance
    pub fn record_echo(&mut self, echo_us: f32) -> f32 {
        self.accept(raw_inches(echo_us))
    }

    /// Apply the plausibility filter to a distance in inches
    ///
    /// Negative distances and distances beyond the sensor range are
    /// discarded; the previous distance is kept.
    pub fn accept(&mut self, inches: f32) -> f32 {
        if (0.0..=self.max_range_in).contains(&inches) {
            self.distance_in = inches;
        }
        self.distance_in
    }

    /// Current filtered distance in inches
    pub fn distance_in(&self) -> f32 {
        self.distance_in
    }

    /// Proximity state for the current distance
    pub fn proximity(&self) -> Proximity {
        if self.distance_in < self.threshold_in {
            Proximity::Warning
        } else {
            Proximity::Clear
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echo_conversion() {
        // 0.034 * 1000 / 2 = 17 cm -> 6.8 in -> 5.8 in after offset
        let inches = raw_inches(1000.0);
        assert!(inches > 5.79 && inches < 5.81);
    }

    #[test]
    fn test_negative_reading_discarded() {
        let mut sonar = Sonar::new(&SensorConfig::default());
        sonar.accept(40.0);
        assert_eq!(sonar.accept(-3.0), 40.0);
    }

    #[test]
    fn test_out_of_range_reading_discarded() {
        let mut sonar = Sonar::new(&SensorConfig::default());
        sonar.accept(40.0);
        assert_eq!(sonar.accept(150.0), 40.0);
    }

    #[test]
    fn test_warning_threshold() {
        let mut sonar = Sonar::new(&SensorConfig::default());
        assert_eq!(sonar.proximity(), Proximity::Clear);
        sonar.record_echo(1000.0);
        assert_eq!(sonar.proximity(), Proximity::Warning);
        sonar.accept(10.0);
        assert_eq!(sonar.proximity(), Proximity::Clear);
    }
}
