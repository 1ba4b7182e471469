//! Dashlink - Master Firmware
//!
//! Master MCU of the two-board instrument cluster (STM32F446RE). Samples
//! wheel speed, rear proximity, ambient light and the panel switches, runs
//! the TFT menu and streams one-byte commands to the slave board over I2C.
//!
//! ```text
//!  hall ─┐                        ┌─► I2C link ─► slave (needles, lamps, digits)
//!  sonar ├─► signals ─► controller┼─► EEPROM / RTC (same bus)
//!  light ┘                 ▲      ├─► TFT (SPI2)
//!  switches/encoder/tick ──┘      └─► backlight, bluetooth enable, IWDG
//! ```

#![no_std]
#![no_main]

mod board;
mod channels;
mod tasks;

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::adc::Adc;
use embassy_stm32::bind_interrupts;
use embassy_stm32::exti::{self, ExtiInput};
use embassy_stm32::gpio::{Input, Level, Output, OutputType, Pull, Speed};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::interrupt;
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::{khz, Hertz};
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::wdg::IndependentWatchdog;
use embassy_time::{block_for, Delay, Duration};
use embedded_hal_bus::i2c::RefCellDevice;
use embedded_hal_bus::spi::ExclusiveDevice;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use cluster_core::config::ClusterConfig;
use cluster_core::orchestrator::{MasterIo, Orchestrator};
use cluster_core::traits::Button;
use cluster_drivers::clock::Ds3231;
use cluster_drivers::link::I2cLink;
use cluster_drivers::store::At24;
use cluster_drivers::tft::Ili9341;
use cluster_hal::Compat;

use crate::board::{MasterOutputs, PanelPins};
use crate::channels::REQUESTS;
use crate::tasks::buttons::Trigger;
use crate::tasks::controller::MasterBus;

bind_interrupts!(struct Irqs {
    EXTI2 => exti::InterruptHandler<interrupt::typelevel::EXTI2>;
    EXTI4 => exti::InterruptHandler<interrupt::typelevel::EXTI4>;
    EXTI9_5 => exti::InterruptHandler<interrupt::typelevel::EXTI9_5>;
    EXTI15_10 => exti::InterruptHandler<interrupt::typelevel::EXTI15_10>;
});

/// I2C1 shared by the slave link, the EEPROM and the RTC
static I2C_BUS: StaticCell<RefCell<MasterBus>> = StaticCell::new();

/// Backlight PWM frequency
const BACKLIGHT_PWM_KHZ: u32 = 1;

/// TFT SPI clock
const TFT_SPI_HZ: u32 = 8_000_000;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Dashlink master starting...");

    let config = ClusterConfig::default();
    let p = embassy_stm32::init(Default::default());
    info!("Peripherals initialized");

    // I2C1 (PB8=SCL, PB9=SDA), standard mode
    let i2c = I2c::new_blocking(p.I2C1, p.PB8, p.PB9, i2c::Config::default());
    let bus: &'static RefCell<MasterBus> = I2C_BUS.init(RefCell::new(i2c));

    let link = I2cLink::new(Compat(RefCellDevice::new(bus)), config.bus.slave_address);
    let store = At24::new(Compat(RefCellDevice::new(bus)), config.bus.eeprom_address);
    let clock = Ds3231::new(Compat(RefCellDevice::new(bus)), config.bus.rtc_address);
    info!(
        "I2C1 up: slave 0x{:02x}, eeprom 0x{:02x}, rtc 0x{:02x}",
        config.bus.slave_address, config.bus.eeprom_address, config.bus.rtc_address
    );

    // TFT on SPI2 (PB13=SCK, PB15=MOSI, PB12=CS, PB14=DC)
    let mut spi_config = spi::Config::default();
    spi_config.frequency = Hertz(TFT_SPI_HZ);
    let spi = Spi::new_blocking_txonly(p.SPI2, p.PB13, p.PB15, spi_config);
    let cs = Output::new(p.PB12, Level::High, Speed::VeryHigh);
    let dc = Output::new(p.PB14, Level::Low, Speed::VeryHigh);

    let spi = ExclusiveDevice::new(spi, cs, Delay).expect("TFT CS pin init failed");
    let mut tft = Ili9341::new(Compat(spi), Compat(dc));
    if let Err(e) = tft.init(|ms| block_for(Duration::from_millis(ms as u64))) {
        error!("Failed to initialize TFT: {:?}", e);
    } else {
        info!("TFT initialized");
    }

    // Backlight (PA1, TIM2 CH2), bluetooth enable (PA11), IWDG
    let backlight_pin = PwmPin::new_ch2(p.PA1, OutputType::PushPull);
    let pwm = SimplePwm::new(
        p.TIM2,
        None,
        Some(backlight_pin),
        None,
        None,
        khz(BACKLIGHT_PWM_KHZ),
        Default::default(),
    );
    let bluetooth = Output::new(p.PA11, Level::Low, Speed::Low);
    let watchdog = IndependentWatchdog::new(p.IWDG, config.timing.watchdog_window_ms * 1000);
    let outputs = MasterOutputs::new(pwm, bluetooth, watchdog);

    let io = MasterIo {
        bus: link,
        store,
        clock,
        display: tft,
        panel: PanelPins,
        outputs,
    };
    let orchestrator = Orchestrator::new(io, config);

    // Panel switches, all active low with pull-ups
    let switches = [
        (
            Button::Menu,
            Trigger::Falling,
            ExtiInput::new(p.PA12, p.EXTI12, Pull::Up, Irqs),
            &REQUESTS.menu,
        ),
        (
            Button::EncoderSwitch,
            Trigger::Falling,
            ExtiInput::new(p.PB2, p.EXTI2, Pull::Up, Irqs),
            &REQUESTS.confirm,
        ),
        (
            Button::TripReset,
            Trigger::Falling,
            ExtiInput::new(p.PA9, p.EXTI9, Pull::Up, Irqs),
            &REQUESTS.reset,
        ),
        (
            Button::Bluetooth,
            Trigger::Falling,
            ExtiInput::new(p.PA10, p.EXTI10, Pull::Up, Irqs),
            &REQUESTS.bluetooth,
        ),
        (
            Button::TurnRight,
            Trigger::Both,
            ExtiInput::new(p.PA6, p.EXTI6, Pull::Up, Irqs),
            &REQUESTS.turn,
        ),
        (
            Button::TurnLeft,
            Trigger::Both,
            ExtiInput::new(p.PA7, p.EXTI7, Pull::Up, Irqs),
            &REQUESTS.turn,
        ),
        (
            Button::HangTest,
            Trigger::Falling,
            ExtiInput::new(p.PC13, p.EXTI13, Pull::Up, Irqs),
            &REQUESTS.hang_test,
        ),
    ];

    // Encoder (PB0=CLK, PB1=DT), polled
    let enc_clk = Input::new(p.PB0, Pull::Up);
    let enc_dt = Input::new(p.PB1, Pull::Up);

    // Hall sensor (PC8), sonar (PA5 trigger, PB4 echo), photosensor (PA0)
    let hall = ExtiInput::new(p.PC8, p.EXTI8, Pull::None, Irqs);
    let trigger = Output::new(p.PA5, Level::Low, Speed::Low);
    let echo = ExtiInput::new(p.PB4, p.EXTI4, Pull::None, Irqs);
    let adc = Adc::new(p.ADC1);

    // Spawn tasks
    spawner
        .spawn(tasks::tick_task(config.timing.display_tick_ms))
        .unwrap();
    for (button, trigger, pin, flag) in switches {
        spawner
            .spawn(tasks::button_task(button, trigger, pin, flag))
            .unwrap();
    }
    spawner.spawn(tasks::encoder_task(enc_clk, enc_dt)).unwrap();
    spawner
        .spawn(tasks::hall_task(
            hall,
            config.sensor,
            config.timing.stall_timeout_ms,
        ))
        .unwrap();
    spawner
        .spawn(tasks::sonar_task(trigger, echo, config.sensor))
        .unwrap();
    spawner.spawn(tasks::light_task(adc, p.PA0)).unwrap();
    spawner.spawn(tasks::controller_task(orchestrator)).unwrap();

    info!("All tasks spawned");
}
