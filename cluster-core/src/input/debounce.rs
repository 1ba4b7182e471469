//! Majority-vote debouncing

use crate::config::UiConfig;

/// Samples a switch repeatedly and accepts the press on a majority of lows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    samples: u8,
    threshold: u8,
}

impl Debouncer {
    /// Create a debouncer taking `samples` reads, pressed at `threshold` lows
    pub const fn new(samples: u8, threshold: u8) -> Self {
        Self { samples, threshold }
    }

    /// Create a debouncer from the UI configuration
    pub fn from_config(config: &UiConfig) -> Self {
        Self::new(config.debounce_samples, config.debounce_threshold)
    }

    /// Sample the switch and decide whether it is pressed
    ///
    /// `read_low` is called once per sample and returns true while the
    /// (active-low) switch reads low.
    pub fn is_pressed(&self, mut read_low: impl FnMut() -> bool) -> bool {
        let lows = (0..self.samples).filter(|_| read_low()).count();
        lows >= self.threshold as usize
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}
