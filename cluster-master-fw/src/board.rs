//! Master board wiring
//!
//! Pin map (NUCLEO-F446RE):
//!
//! ```text
//! PA6  turn stalk right      PA12 menu button       PB0  encoder CLK
//! PA7  turn stalk left       PB2  encoder switch    PB1  encoder DT
//! PA9  trip reset            PC13 hang-test switch  PC8  hall sensor
//! PA10 bluetooth button      PA11 bluetooth enable  PA5  sonar trigger
//! PA0  photosensor (ADC1)    PA1  backlight (TIM2)  PB4  sonar echo
//! PB8  I2C1 SCL              PB9  I2C1 SDA
//! PB13 SPI2 SCK              PB15 SPI2 MOSI         PB12 TFT CS   PB14 TFT DC
//! ```
//!
//! Each switch is owned by its edge task. The debouncer samples the level
//! straight from the port's input data register, which reading does not
//! disturb.

use embassy_stm32::gpio::Output;
use embassy_stm32::pac;
use embassy_stm32::pac::gpio::{vals, Gpio};
use embassy_stm32::peripherals::{IWDG, TIM2};
use embassy_stm32::timer::simple_pwm::SimplePwm;
use embassy_stm32::wdg::IndependentWatchdog;

use cluster_core::sensor::BacklightLevel;
use cluster_core::traits::{Button, ButtonPanel, PanelOutputs};

/// Port and line of a panel switch
fn switch_line(button: Button) -> (Gpio, usize) {
    match button {
        Button::Menu => (pac::GPIOA, 12),
        Button::EncoderSwitch => (pac::GPIOB, 2),
        Button::TripReset => (pac::GPIOA, 9),
        Button::Bluetooth => (pac::GPIOA, 10),
        Button::TurnRight => (pac::GPIOA, 6),
        Button::TurnLeft => (pac::GPIOA, 7),
        Button::HangTest => (pac::GPIOC, 13),
    }
}

/// Switch levels for the debouncer
pub struct PanelPins;

impl ButtonPanel for PanelPins {
    fn is_low(&mut self, button: Button) -> bool {
        let (port, line) = switch_line(button);
        port.idr().read().idr(line) == vals::Idr::LOW
    }
}

/// Backlight PWM, bluetooth enable and the hardware watchdog
pub struct MasterOutputs {
    backlight: SimplePwm<'static, TIM2>,
    bluetooth: Output<'static>,
    watchdog: IndependentWatchdog<'static, IWDG>,
}

impl MasterOutputs {
    /// Take the outputs; the watchdog stays stopped until [`arm_watchdog`](Self::arm_watchdog)
    pub fn new(
        mut backlight: SimplePwm<'static, TIM2>,
        bluetooth: Output<'static>,
        watchdog: IndependentWatchdog<'static, IWDG>,
    ) -> Self {
        backlight.ch2().enable();
        Self {
            backlight,
            bluetooth,
            watchdog,
        }
    }

    /// Start the watchdog; it cannot be stopped afterwards
    pub fn arm_watchdog(&mut self) {
        self.watchdog.unleash();
    }
}

impl PanelOutputs for MasterOutputs {
    fn set_backlight(&mut self, level: BacklightLevel) {
        self.backlight
            .ch2()
            .set_duty_cycle_percent(level.duty_percent());
    }

    fn set_bluetooth(&mut self, enabled: bool) {
        if enabled {
            self.bluetooth.set_high();
        } else {
            self.bluetooth.set_low();
        }
    }

    fn kick_watchdog(&mut self) {
        self.watchdog.pet();
    }
}
