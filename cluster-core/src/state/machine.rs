//! State machine definition

use super::events::{Event, MenuItem};

/// Master display states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DashboardState {
    /// Screen picker
    #[default]
    Menu,
    /// Clock screen, editable
    Time,
    /// Calendar screen, editable
    Date,
    /// Temperature screen
    Temp,
}

// Persisted representation
const STATE_MENU: u8 = 0;
const STATE_TIME: u8 = 1;
const STATE_DATE: u8 = 2;
const STATE_TEMP: u8 = 3;

impl DashboardState {
    /// Check if this screen has an edit sub-mode
    pub fn has_edit_mode(&self) -> bool {
        matches!(self, DashboardState::Time | DashboardState::Date)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use DashboardState::*;

        match (self, event) {
            (Menu, Event::Select(MenuItem::Time)) => Time,
            (Menu, Event::Select(MenuItem::Date)) => Date,
            (Menu, Event::Select(MenuItem::Temp)) => Temp,

            (Time | Date | Temp, Event::MenuButton) => Menu,

            // Default: stay in current state
            _ => self,
        }
    }

    /// Persisted byte
    pub fn to_byte(self) -> u8 {
        match self {
            DashboardState::Menu => STATE_MENU,
            DashboardState::Time => STATE_TIME,
            DashboardState::Date => STATE_DATE,
            DashboardState::Temp => STATE_TEMP,
        }
    }

    /// Parse a persisted byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            STATE_MENU => Some(DashboardState::Menu),
            STATE_TIME => Some(DashboardState::Time),
            STATE_DATE => Some(DashboardState::Date),
            STATE_TEMP => Some(DashboardState::Temp),
            _ => None,
        }
    }
}
