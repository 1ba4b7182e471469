//! Display tick
//!
//! Counts 250 ms periods for the orchestrator's blink, banner and refresh
//! work. The orchestrator catches up on every tick it missed.

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::channels::REQUESTS;

/// Tick task
#[embassy_executor::task]
pub async fn tick_task(period_ms: u32) {
    info!("Tick task started ({} ms)", period_ms);

    let mut ticker = Ticker::every(Duration::from_millis(period_ms as u64));

    loop {
        ticker.next().await;
        REQUESTS.ticks.increment();
    }
}
