//! Command link task
//!
//! Receives opcodes from the master and hands them to the dispatcher,
//! which updates the digits directly and posts everything else for the
//! actuator tick.

use defmt::*;
use embassy_stm32::gpio::Output;
use embassy_stm32::mode::Blocking;
use embassy_stm32::spi::Spi;
use embassy_time::{Delay, Duration, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;

use cluster_core::config::{GaugeConfig, UiConfig};
use cluster_core::dispatch::Dispatcher;
use cluster_drivers::display::Max7219;
use cluster_hal::Compat;

use crate::channels::SHARED;
use crate::i2c_slave::SlaveReceiver;

/// MAX7219 on SPI1
pub type Digits = Max7219<Compat<ExclusiveDevice<Spi<'static, Blocking>, Output<'static>, Delay>>>;

/// Flag poll interval, shorter than one byte at 100 kHz
const POLL_US: u64 = 20;

/// Link task
#[embassy_executor::task]
pub async fn link_task(
    mut receiver: SlaveReceiver,
    mut digits: Digits,
    gauge: GaugeConfig,
    ui: UiConfig,
) {
    info!("Link task started");

    let mut dispatcher = Dispatcher::new(&SHARED, gauge, &ui);
    if let Err(e) = dispatcher.show_initial(&mut digits) {
        warn!("Failed to show initial digits: {:?}", e);
    }

    loop {
        if let Some(byte) = receiver.poll() {
            let previous = dispatcher.previous();
            match dispatcher.dispatch(byte, &mut digits) {
                Ok(Some(command)) if previous == Some(command) => {
                    trace!("Repeated {:?}", command);
                }
                Ok(Some(command)) => {
                    debug!("Command {:?}", command);
                }
                Ok(None) => {
                    trace!("Ignored byte 0x{:02x}", byte);
                }
                Err(e) => {
                    warn!("Digit update failed: {:?}", e);
                }
            }
        }

        Timer::after(Duration::from_micros(POLL_US)).await;
    }
}
