//! Rear ultrasonic sensor
//!
//! Fires a 10 µs trigger pulse and times the echo pulse. A missing echo
//! leaves the previous distance in place.

use defmt::*;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::Output;
use embassy_time::{with_timeout, Duration, Instant, Ticker, Timer};

use cluster_core::config::SensorConfig;
use cluster_core::sensor::Sonar;

use crate::channels::PROXIMITY;

/// Measurement period
const PING_INTERVAL_MS: u64 = 60;

/// Longest echo worth waiting for (well past the sensor range)
const ECHO_TIMEOUT_MS: u64 = 30;

/// Sonar task
#[embassy_executor::task]
pub async fn sonar_task(mut trigger: Output<'static>, mut echo: ExtiInput<'static>, config: SensorConfig) {
    info!("Sonar task started");

    let mut sonar = Sonar::new(&config);
    let timeout = Duration::from_millis(ECHO_TIMEOUT_MS);
    let mut ticker = Ticker::every(Duration::from_millis(PING_INTERVAL_MS));
    let mut last = sonar.proximity();
    PROXIMITY.signal(last);

    loop {
        ticker.next().await;

        trigger.set_high();
        Timer::after_micros(10).await;
        trigger.set_low();

        if with_timeout(timeout, echo.wait_for_rising_edge()).await.is_err() {
            trace!("No echo");
            continue;
        }
        let start = Instant::now();
        if with_timeout(timeout, echo.wait_for_falling_edge()).await.is_err() {
            trace!("Echo did not end");
            continue;
        }
        let width_us = start.elapsed().as_micros();

        let inches = sonar.record_echo(width_us as f32);
        let proximity = sonar.proximity();
        if proximity != last {
            debug!("Proximity {:?} at {} in", proximity, inches);
            last = proximity;
        }
        PROXIMITY.signal(proximity);
    }
}
