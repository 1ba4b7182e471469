//! Indicator states carried by the protocol

/// Turn signal selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnSignal {
    /// Both turn lamps off
    #[default]
    Off,
    /// Left lamp blinking
    Left,
    /// Right lamp blinking
    Right,
}

/// Proximity warning state from the rear sonar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Proximity {
    /// Nothing within the warning distance
    #[default]
    Clear,
    /// Obstacle within the warning distance
    Warning,
}

impl Proximity {
    /// Returns true if the warning lamp should blink
    pub fn is_warning(self) -> bool {
        self == Proximity::Warning
    }
}
