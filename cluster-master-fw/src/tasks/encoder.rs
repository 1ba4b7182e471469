//! Rotary encoder polling
//!
//! Samples CLK/DT every couple of milliseconds and counts decoded detents.
//! The orchestrator decides whether a detent means anything.

use defmt::*;
use embassy_stm32::gpio::Input;
use embassy_time::{Duration, Timer};

use cluster_core::input::{QuadratureDecoder, Rotation};

use crate::channels::REQUESTS;

/// Poll interval
const POLL_MS: u64 = 2;

/// Encoder task
#[embassy_executor::task]
pub async fn encoder_task(clk: Input<'static>, dt: Input<'static>) {
    info!("Encoder task started");

    let mut decoder = QuadratureDecoder::new(clk.is_high(), dt.is_high());

    loop {
        Timer::after(Duration::from_millis(POLL_MS)).await;

        match decoder.update(clk.is_high(), dt.is_high()) {
            Some(Rotation::Clockwise) => {
                trace!("Encoder: CW");
                REQUESTS.clockwise.increment();
            }
            Some(Rotation::CounterClockwise) => {
                trace!("Encoder: CCW");
                REQUESTS.counter_clockwise.increment();
            }
            None => {}
        }
    }
}
