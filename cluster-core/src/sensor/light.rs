//! Ambient light to backlight level

/// Full-scale count of the 12-bit ADC
const ADC_FULL_SCALE: u16 = 4095;

/// ADC reference voltage
const ADC_REFERENCE_V: f32 = 3.3;

/// Below this the cabin is dark
const DARK_V: f32 = 1.0;

/// Below this the cabin is dim
const DUSK_V: f32 = 2.2;

/// Backlight brightness step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BacklightLevel {
    /// Night driving
    Dim,
    /// Dusk or tunnel
    Medium,
    /// Daylight
    Full,
}

impl BacklightLevel {
    /// Classify a raw photosensor reading
    pub fn from_adc(raw: u16) -> Self {
        let volts = raw.min(ADC_FULL_SCALE) as f32 * ADC_REFERENCE_V / ADC_FULL_SCALE as f32;
        if volts < DARK_V {
            BacklightLevel::Dim
        } else if volts < DUSK_V {
            BacklightLevel::Medium
        } else {
            BacklightLevel::Full
        }
    }

    /// PWM duty cycle for this level
    pub fn duty_percent(self) -> u8 {
        match self {
            BacklightLevel::Dim => 30,
            BacklightLevel::Medium => 60,
            BacklightLevel::Full => 100,
        }
    }
}
