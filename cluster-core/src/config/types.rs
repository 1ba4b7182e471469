//! Configuration sections

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tick periods and timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Master display tick (blink phase, redraw flag)
    pub display_tick_ms: u32,
    /// Display ticks per full clock re-read and mileage update
    pub ticks_per_refresh: u8,
    /// Slave actuator tick (one gauge phase per tick at most)
    pub gauge_tick_ms: u32,
    /// Gauge ticks per lamp blink phase
    pub blink_divider: u16,
    /// Hardware watchdog reload window on the master
    pub watchdog_window_ms: u32,
    /// Keepalive window monitored by the slave
    pub link_window_ms: u32,
    /// Mileage ticks replayed at boot between two keepalives
    pub replay_keepalive_every: u16,
    /// No hall edge within this time means the wheel stopped
    pub stall_timeout_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            display_tick_ms: 250,
            ticks_per_refresh: 4,
            gauge_tick_ms: 1,
            blink_divider: 250,
            watchdog_window_ms: 1000,
            link_window_ms: 1000,
            replay_keepalive_every: 100,
            stall_timeout_ms: 900,
        }
    }
}

/// 7-bit bus addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// Slave MCU
    pub slave_address: u8,
    /// 24xx EEPROM holding the persisted record
    pub eeprom_address: u8,
    /// DS3231 real-time clock
    pub rtc_address: u8,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            slave_address: 0x32,
            eeprom_address: 0x57,
            rtc_address: 0x68,
        }
    }
}

/// Needle scaling, in steps per mph ×10 of the bucket breakpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaugeConfig {
    /// Speedometer needle (4 steps per mph)
    pub mph_steps_x10: u16,
    /// Tachometer needle (3.5 steps per mph)
    pub rpm_steps_x10: u16,
    /// Reverse sweep used to park both needles at boot
    pub homing_steps: u16,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            mph_steps_x10: 40,
            rpm_steps_x10: 35,
            homing_steps: 400,
        }
    }
}

impl GaugeConfig {
    /// Step targets for a breakpoint speed, truncated toward zero
    pub fn targets_for(&self, mph: u8) -> (i32, i32) {
        let mph = mph as i32;
        (
            mph * self.rpm_steps_x10 as i32 / 10,
            mph * self.mph_steps_x10 as i32 / 10,
        )
    }
}

/// Sensor conversion constants
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// Hall timer rate
    pub hall_ticks_per_second: u32,
    /// Revolutions averaged per speed update
    pub rpm_block: u8,
    /// Wheel radius in feet
    pub wheel_radius_ft: f32,
    /// Speeds above this are discarded as noise
    pub max_mph: f32,
    /// Sonar readings below this distance raise the warning
    pub proximity_threshold_in: f32,
    /// Sonar readings above this distance are discarded
    pub max_range_in: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            hall_ticks_per_second: 10_000,
            rpm_block: 7,
            wheel_radius_ft: 1.5,
            max_mph: 100.0,
            proximity_threshold_in: 10.0,
            max_range_in: 100.0,
        }
    }
}

/// Input and display behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UiConfig {
    /// Samples taken per debounce decision
    pub debounce_samples: u8,
    /// Low samples required to accept a press
    pub debounce_threshold: u8,
    /// Display ticks the bluetooth banner stays up
    pub banner_ticks: u8,
    /// Largest value the 4-digit odometer can show
    pub odometer_limit: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_samples: 30,
            debounce_threshold: 20,
            banner_ticks: 4,
            odometer_limit: 9999,
        }
    }
}
