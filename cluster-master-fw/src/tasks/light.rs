//! Ambient light sampling

use defmt::*;
use embassy_stm32::adc::Adc;
use embassy_stm32::peripherals::{ADC1, PA0};
use embassy_stm32::Peri;
use embassy_time::{Duration, Ticker};

use cluster_core::sensor::BacklightLevel;

use crate::channels::BACKLIGHT;

/// Sample period
const SAMPLE_INTERVAL_MS: u64 = 500;

/// Photosensor task
#[embassy_executor::task]
pub async fn light_task(mut adc: Adc<'static, ADC1>, mut pin: Peri<'static, PA0>) {
    info!("Light task started");

    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_INTERVAL_MS));
    let mut last: Option<BacklightLevel> = None;

    loop {
        let raw = adc.blocking_read(&mut pin);
        let level = BacklightLevel::from_adc(raw);
        if last != Some(level) {
            debug!("Backlight {:?} (raw {})", level, raw);
            last = Some(level);
        }
        BACKLIGHT.signal(level);

        ticker.next().await;
    }
}
