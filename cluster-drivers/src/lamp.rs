//! GPIO indicator lamps
//!
//! Turn and warning LEDs, each on its own pin. The pins can be
//! active-high (default) or active-low for sinking drivers.

use cluster_core::traits::{Lamp, LampOutputs};
use cluster_hal::OutputPin;

/// Three lamp outputs
pub struct GpioLamps<P> {
    left: P,
    right: P,
    warning: P,
    /// If true, lamp ON = pin LOW
    inverted: bool,
    lit: [bool; 3],
}

impl<P: OutputPin> GpioLamps<P> {
    /// Create the lamp bank with every lamp dark
    ///
    /// # Arguments
    /// - `inverted`: if true, a lamp is lit when its pin is LOW
    pub fn new(left: P, right: P, warning: P, inverted: bool) -> Self {
        let mut lamps = Self {
            left,
            right,
            warning,
            inverted,
            lit: [false; 3],
        };
        for lamp in [Lamp::Left, Lamp::Right, Lamp::Warning] {
            lamps.set_lamp(lamp, false);
        }
        lamps
    }

    /// Active-high lamp bank
    pub fn new_active_high(left: P, right: P, warning: P) -> Self {
        Self::new(left, right, warning, false)
    }

    fn index(lamp: Lamp) -> usize {
        match lamp {
            Lamp::Left => 0,
            Lamp::Right => 1,
            Lamp::Warning => 2,
        }
    }
}

impl<P: OutputPin> LampOutputs for GpioLamps<P> {
    fn set_lamp(&mut self, lamp: Lamp, on: bool) {
        self.lit[Self::index(lamp)] = on;
        let pin = match lamp {
            Lamp::Left => &mut self.left,
            Lamp::Right => &mut self.right,
            Lamp::Warning => &mut self.warning,
        };
        pin.set_state(on != self.inverted);
    }

    fn is_lit(&self, lamp: Lamp) -> bool {
        self.lit[Self::index(lamp)]
    }
}
