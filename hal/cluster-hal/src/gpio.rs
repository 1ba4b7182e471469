//! GPIO pin abstractions
//!
//! Stepper coils, lamps and chip selects are outputs; buttons, the turn
//! switch and the encoder are inputs (active low, pulled up).

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&mut self) -> bool;
}

/// Digital input pin
///
/// Sampling takes `&mut self` so debouncers can hold a pin exclusively.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    ///
    /// All cluster buttons are wired active low.
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Latch(bool);

    impl OutputPin for Latch {
        fn set_high(&mut self) {
            self.0 = true;
        }

        fn set_low(&mut self) {
            self.0 = false;
        }

        fn is_set_high(&mut self) -> bool {
            self.0
        }
    }

    impl InputPin for Latch {
        fn is_high(&mut self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_set_state_drives_level() {
        let mut pin = Latch(false);
        pin.set_state(true);
        assert!(pin.is_set_high());
        pin.set_state(false);
        assert!(!pin.is_set_high());
    }

    #[test]
    fn test_is_low_inverts_level() {
        let mut pin = Latch(false);
        assert!(pin.is_low());
        pin.set_high();
        assert!(!pin.is_low());
    }
}
