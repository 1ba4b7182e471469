//! Slave-side physical outputs

/// Four-coil unipolar stepper
pub trait CoilDriver {
    /// Energize the coils set in the low four bits of `pattern`
    ///
    /// Bit 0 is IN1, bit 3 is IN4. All other coils are released.
    fn energize(&mut self, pattern: u8);

    /// Release every coil
    fn release(&mut self) {
        self.energize(0);
    }
}

/// Indicator lamps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lamp {
    Left,
    Right,
    Warning,
}

/// Lamp output bank
pub trait LampOutputs {
    /// Switch one lamp
    fn set_lamp(&mut self, lamp: Lamp, on: bool);

    /// Check if a lamp is lit
    fn is_lit(&self, lamp: Lamp) -> bool;
}
