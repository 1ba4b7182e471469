//! Menu navigation
//!
//! The menu starts in a browsing phase where the encoder is ignored. The
//! first confirm press starts highlighting; from then on each detent moves
//! the highlight and the next confirm opens the highlighted screen.
//!
//! Clockwise and counter-clockwise detents are counted separately, each
//! wrapping past 3 to 0, and the selection is their distance:
//!
//! ```text
//! selection = |cw - ccw|   0 = Time, 1 = Date, 2 = Temp, 3 = nothing
//! ```

use crate::state::MenuItem;

/// Selection index meaning "nothing highlighted"
pub const NO_SELECTION: u8 = 3;

/// Navigator phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuPhase {
    /// Static menu, encoder ignored
    Browsing,
    /// Highlight follows the encoder
    Highlighting,
}

/// Outcome of a confirm press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuConfirm {
    /// Highlighting started
    Highlighting,
    /// A screen was chosen
    Selected(MenuItem),
    /// Confirmed with nothing highlighted; back to browsing
    Dismissed,
}

/// Menu highlight tracker
#[derive(Debug, Clone)]
pub struct MenuNavigator {
    phase: MenuPhase,
    cw: u8,
    ccw: u8,
}

impl Default for MenuNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuNavigator {
    pub const fn new() -> Self {
        Self {
            phase: MenuPhase::Browsing,
            cw: 0,
            ccw: 0,
        }
    }

    /// Apply encoder detents
    ///
    /// Returns true if the selection changed.
    pub fn rotate(&mut self, clockwise: u8, counter_clockwise: u8) -> bool {
        if self.phase != MenuPhase::Highlighting {
            return false;
        }
        let before = self.selection();
        self.cw = ((self.cw as u16 + clockwise as u16) % 4) as u8;
        self.ccw = ((self.ccw as u16 + counter_clockwise as u16) % 4) as u8;
        self.selection() != before
    }

    /// Handle a confirm press
    pub fn confirm(&mut self) -> MenuConfirm {
        match self.phase {
            MenuPhase::Browsing => {
                self.phase = MenuPhase::Highlighting;
                MenuConfirm::Highlighting
            }
            MenuPhase::Highlighting => {
                let item = MenuItem::from_selection(self.selection());
                self.reset();
                match item {
                    Some(item) => MenuConfirm::Selected(item),
                    None => MenuConfirm::Dismissed,
                }
            }
        }
    }

    /// Back to browsing with the counters cleared
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current selection index, 0–3
    pub fn selection(&self) -> u8 {
        let distance = self.cw.abs_diff(self.ccw);
        if distance > NO_SELECTION {
            0
        } else {
            distance
        }
    }

    /// Highlighted item, if any
    pub fn highlighted(&self) -> Option<MenuItem> {
        match self.phase {
            MenuPhase::Highlighting => MenuItem::from_selection(self.selection()),
            MenuPhase::Browsing => None,
        }
    }

    pub fn phase(&self) -> MenuPhase {
        self.phase
    }
}
