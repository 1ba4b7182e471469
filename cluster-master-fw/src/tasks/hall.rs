//! Hall-effect wheel sensor
//!
//! Times the interval between rising edges in units of the sensor's
//! capture clock and feeds it to the block-averaging [`SpeedSensor`]. No
//! edge within the stall timeout means the wheel has stopped.

use defmt::*;
use embassy_stm32::exti::ExtiInput;
use embassy_time::{with_timeout, Duration, Instant};

use cluster_core::config::SensorConfig;
use cluster_core::sensor::SpeedSensor;

use crate::channels::SPEED;

/// Hall sensor task
#[embassy_executor::task]
pub async fn hall_task(mut pin: ExtiInput<'static>, config: SensorConfig, stall_timeout_ms: u32) {
    info!("Hall task started");

    let mut sensor = SpeedSensor::new(config);
    let stall = Duration::from_millis(stall_timeout_ms as u64);
    let us_per_tick = (1_000_000 / config.hall_ticks_per_second.max(1)) as u64;
    let mut last_edge: Option<Instant> = None;

    loop {
        match with_timeout(stall, pin.wait_for_rising_edge()).await {
            Ok(()) => {
                let now = Instant::now();
                if let Some(previous) = last_edge.replace(now) {
                    let ticks = (now - previous).as_micros() / us_per_tick.max(1);
                    if let Some(mph) = sensor.record_capture(ticks.min(u32::MAX as u64) as u32) {
                        trace!("Speed {} mph", mph);
                        SPEED.signal(mph);
                    }
                }
            }
            Err(_) => {
                if sensor.mph() != 0.0 {
                    debug!("Wheel stalled");
                }
                sensor.stalled();
                last_edge = None;
                SPEED.signal(0.0);
            }
        }
    }
}
