//! Dashlink - Slave Firmware
//!
//! Slave MCU of the two-board instrument cluster (STM32F446RE). Listens on
//! I2C for one-byte commands from the master and turns them into needle
//! motion, turn/warning lamp blinking and seven-segment digits.
//!
//! Pin map (NUCLEO-F446RE):
//!
//! ```text
//! PB8/PB9   I2C1 SCL/SDA (slave 0x32)
//! PA5/PA7   SPI1 SCK/MOSI, PA1 MAX7219 CS
//! PB4..PB7  tachometer coils IN1..IN4
//! PC4..PC7  speedometer coils IN1..IN4
//! PA8/PA9   left/right turn lamps, PA10 warning lamp
//! ```

#![no_std]
#![no_main]

mod channels;
mod i2c_slave;
mod tasks;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use {defmt_rtt as _, panic_probe as _};

use cluster_core::config::ClusterConfig;
use cluster_drivers::display::Max7219;
use cluster_drivers::lamp::GpioLamps;
use cluster_drivers::stepper::UnipolarCoils;
use cluster_hal::Compat;

use crate::i2c_slave::SlaveReceiver;

/// MAX7219 SPI clock
const DIGITS_SPI_HZ: u32 = 1_000_000;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Dashlink slave starting...");

    let config = ClusterConfig::default();
    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    // Seven-segment digits on SPI1 (PA5=SCK, PA7=MOSI, PA1=CS)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(DIGITS_SPI_HZ);
    let spi = Spi::new_blocking_txonly(p.SPI1, p.PA5, p.PA7, spi_config);
    let cs = Output::new(p.PA1, Level::High, Speed::VeryHigh);
    let spi = ExclusiveDevice::new(spi, cs, Delay).expect("MAX7219 CS pin init failed");
    let mut digits = Max7219::new(Compat(spi));
    if let Err(e) = digits.init() {
        error!("Failed to initialize digits: {:?}", e);
    } else {
        info!("MAX7219 initialized");
    }

    // Gauge motors
    let rpm_coils = UnipolarCoils::new([
        Compat(Output::new(p.PB4, Level::Low, Speed::Low)),
        Compat(Output::new(p.PB5, Level::Low, Speed::Low)),
        Compat(Output::new(p.PB6, Level::Low, Speed::Low)),
        Compat(Output::new(p.PB7, Level::Low, Speed::Low)),
    ]);
    let mph_coils = UnipolarCoils::new([
        Compat(Output::new(p.PC4, Level::Low, Speed::Low)),
        Compat(Output::new(p.PC5, Level::Low, Speed::Low)),
        Compat(Output::new(p.PC6, Level::Low, Speed::Low)),
        Compat(Output::new(p.PC7, Level::Low, Speed::Low)),
    ]);

    // Lamps, active high
    let lamps = GpioLamps::new_active_high(
        Compat(Output::new(p.PA8, Level::Low, Speed::Low)),
        Compat(Output::new(p.PA9, Level::Low, Speed::Low)),
        Compat(Output::new(p.PA10, Level::Low, Speed::Low)),
    );

    // Command link on I2C1 (PB8=SCL, PB9=SDA)
    let i2c = I2c::new_blocking(p.I2C1, p.PB8, p.PB9, i2c::Config::default());
    let receiver = SlaveReceiver::new(i2c, config.bus.slave_address);
    info!("Listening on I2C1 at 0x{:02x}", config.bus.slave_address);

    // Spawn tasks
    spawner
        .spawn(tasks::actuator_task(rpm_coils, mph_coils, lamps, config))
        .unwrap();
    spawner
        .spawn(tasks::link_task(receiver, digits, config.gauge, config.ui))
        .unwrap();

    info!("All tasks spawned");
}
