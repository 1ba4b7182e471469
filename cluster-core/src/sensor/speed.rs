//! Hall-effect wheel speed
//!
//! The hall sensor sees two magnets per wheel revolution. Each capture is
//! the timer count between edges; revolutions are converted to RPM and
//! averaged in fixed blocks before being turned into road speed.

use crate::config::SensorConfig;

/// Feet per mile
const FEET_PER_MILE: f32 = 5280.0;

/// Pi as used by the gauge calibration
const PI_APPROX: f32 = 3.145;

/// Convert a hall capture to RPM
///
/// A zero capture (timer not started) yields 0 RPM.
pub fn rpm_from_ticks(elapsed_ticks: u32, ticks_per_second: u32) -> f32 {
    if elapsed_ticks == 0 {
        return 0.0;
    }
    let seconds = elapsed_ticks as f32 / ticks_per_second as f32;
    60.0 / (seconds * 2.0)
}

/// Convert wheel RPM to road speed
pub fn mph_from_rpm(rpm: f32, wheel_radius_ft: f32) -> f32 {
    rpm * 2.0 * PI_APPROX * wheel_radius_ft * 60.0 / FEET_PER_MILE
}

/// Block-averaging speed sensor
#[derive(Debug, Clone)]
pub struct SpeedSensor {
    config: SensorConfig,
    /// Sum of RPM samples in the current block
    rpm_sum: f32,
    /// Samples in the current block
    samples: u8,
    /// Last accepted block average
    rpm: f32,
    /// Last accepted road speed
    mph: f32,
}

impl SpeedSensor {
    /// Create a sensor reading standstill
    pub fn new(config: SensorConfig) -> Self {
        Self {
            config,
            rpm_sum: 0.0,
            samples: 0,
            rpm: 0.0,
            mph: 0.0,
        }
    }

    /// Record one hall capture
    ///
    /// Returns the new speed when this capture completes a block and the
    /// block average is plausible.
    pub fn record_capture(&mut self, elapsed_ticks: u32) -> Option<f32> {
        self.rpm_sum += rpm_from_ticks(elapsed_ticks, self.config.hall_ticks_per_second);
        self.samples += 1;

        if self.samples < self.config.rpm_block.max(1) {
            return None;
        }

        let average = self.rpm_sum / self.samples as f32;
        self.rpm_sum = 0.0;
        self.samples = 0;

        let mph = mph_from_rpm(average, self.config.wheel_radius_ft);
        if mph > self.config.max_mph {
            return None;
        }

        self.rpm = average;
        self.mph = mph;
        Some(mph)
    }

    /// No hall edge arrived within the stall timeout
    pub fn stalled(&mut self) {
        self.rpm_sum = 0.0;
        self.samples = 0;
        self.rpm = 0.0;
        self.mph = 0.0;
    }

    /// Current road speed in mph
    pub fn mph(&self) -> f32 {
        self.mph
    }

    /// Current wheel speed in RPM
    pub fn rpm(&self) -> f32 {
        self.rpm
    }
}
