//! Main controller task
//!
//! Owns the orchestrator and runs one iteration per loop period. Sensor
//! readings are taken from their signals when they changed; otherwise the
//! previous reading is reused so the periodic opcodes keep flowing.

use defmt::*;
use embassy_stm32::gpio::Output;
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::mode::Blocking;
use embassy_stm32::spi::Spi;
use embassy_time::{Delay, Duration, Ticker};
use embedded_hal_bus::i2c::RefCellDevice;
use embedded_hal_bus::spi::ExclusiveDevice;

use cluster_core::orchestrator::Orchestrator;
use cluster_core::sensor::SensorSnapshot;
use cluster_drivers::clock::Ds3231;
use cluster_drivers::link::I2cLink;
use cluster_drivers::store::At24;
use cluster_drivers::tft::Ili9341;
use cluster_hal::Compat;

use crate::board::{MasterOutputs, PanelPins};
use crate::channels::{BACKLIGHT, PROXIMITY, REQUESTS, SPEED};

/// The master's I2C bus (slave link, EEPROM and RTC)
pub type MasterBus = I2c<'static, Blocking, i2c::Master>;

/// One device's handle on the shared bus
pub type BusHandle = Compat<RefCellDevice<'static, MasterBus>>;

/// TFT on SPI2
pub type Tft = Ili9341<
    Compat<ExclusiveDevice<Spi<'static, Blocking>, Output<'static>, Delay>>,
    Compat<Output<'static>>,
>;

/// Orchestrator wired to the master board
pub type MasterOrchestrator = Orchestrator<
    I2cLink<BusHandle>,
    At24<BusHandle>,
    Ds3231<BusHandle>,
    Tft,
    PanelPins,
    MasterOutputs,
>;

/// Main loop period
const LOOP_MS: u64 = 10;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(mut orchestrator: MasterOrchestrator) {
    info!("Controller task started");

    match orchestrator.restore() {
        Ok(record) => info!(
            "Restored {:?}, {} trip miles, bluetooth {}",
            record.state, record.miles, record.bluetooth
        ),
        Err(e) => warn!("Restore failed: {:?}", e),
    }

    // Mileage replay can take seconds, so the watchdog starts only now
    orchestrator.io_mut().outputs.arm_watchdog();
    info!("Watchdog armed");

    let mut sensors = SensorSnapshot::default();
    let mut ticker = Ticker::every(Duration::from_millis(LOOP_MS));
    let mut state = orchestrator.state();
    let mut dropped = orchestrator.dropped_commands();
    let mut hang_reported = false;

    loop {
        ticker.next().await;

        if let Some(mph) = SPEED.try_take() {
            sensors.mph = mph;
        }
        if let Some(proximity) = PROXIMITY.try_take() {
            sensors.proximity = proximity;
        }
        if let Some(level) = BACKLIGHT.try_take() {
            sensors.backlight = level;
        }

        if let Err(e) = orchestrator.iterate(&REQUESTS, sensors) {
            warn!("Iteration failed: {:?}", e);
        }

        if orchestrator.state() != state {
            state = orchestrator.state();
            debug!("Screen -> {:?}", state);
        }

        if orchestrator.dropped_commands() != dropped {
            dropped = orchestrator.dropped_commands();
            trace!("Link has dropped {} commands", dropped);
        }

        if orchestrator.hang_latched() && !hang_reported {
            hang_reported = true;
            warn!("Hang test latched, watchdog feeding stopped");
        }
    }
}
