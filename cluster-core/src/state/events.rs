//! Events that trigger state transitions

/// Screens reachable from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuItem {
    Time,
    Date,
    Temp,
}

impl MenuItem {
    /// Items in menu order
    pub const ALL: [MenuItem; 3] = [MenuItem::Time, MenuItem::Date, MenuItem::Temp];

    /// Map a menu selection index; 3 and above select nothing
    pub fn from_selection(selection: u8) -> Option<Self> {
        Self::ALL.get(selection as usize).copied()
    }

    /// Menu label
    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Time => "Time",
            MenuItem::Date => "Date",
            MenuItem::Temp => "Temp",
        }
    }
}

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Menu button pressed (debounced)
    MenuButton,
    /// Encoder switch confirmed a highlighted menu item
    Select(MenuItem),
}
