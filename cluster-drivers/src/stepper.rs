//! Unipolar stepper coils
//!
//! A 28BYJ-48 style motor behind a ULN2003 darlington array. Each of the
//! four coil inputs is a plain GPIO; the open-loop sequencing lives in
//! `cluster_core::gauge`, this driver only maps a pattern onto the pins.

use cluster_core::traits::CoilDriver;
use cluster_hal::OutputPin;

/// Four coil outputs, IN1..IN4
pub struct UnipolarCoils<P> {
    coils: [P; 4],
    pattern: u8,
}

impl<P: OutputPin> UnipolarCoils<P> {
    /// Take ownership of the coil pins, all released
    pub fn new(coils: [P; 4]) -> Self {
        let mut driver = Self { coils, pattern: 0 };
        driver.energize(0);
        driver
    }

    /// Pattern currently applied
    pub fn pattern(&self) -> u8 {
        self.pattern
    }
}

impl<P: OutputPin> CoilDriver for UnipolarCoils<P> {
    fn energize(&mut self, pattern: u8) {
        self.pattern = pattern & 0x0F;
        for (bit, coil) in self.coils.iter_mut().enumerate() {
            coil.set_state(self.pattern & (1 << bit) != 0);
        }
    }
}
