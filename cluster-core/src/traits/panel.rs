//! Master-side operator panel

use crate::sensor::BacklightLevel;

/// Panel switches, all active low
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Return to the menu
    Menu,
    /// Encoder push switch
    EncoderSwitch,
    /// Trip odometer reset
    TripReset,
    /// Bluetooth module enable toggle
    Bluetooth,
    /// Turn stalk, right position
    TurnRight,
    /// Turn stalk, left position
    TurnLeft,
    /// Service switch that stops feeding the watchdog
    HangTest,
}

/// Raw switch sampling
pub trait ButtonPanel {
    /// Sample a switch once; true while it reads low
    fn is_low(&mut self, button: Button) -> bool;
}

/// Master outputs driven from the main loop
pub trait PanelOutputs {
    /// Set the TFT backlight brightness
    fn set_backlight(&mut self, level: BacklightLevel);

    /// Switch the bluetooth module
    fn set_bluetooth(&mut self, enabled: bool);

    /// Reload the hardware watchdog
    fn kick_watchdog(&mut self);
}
