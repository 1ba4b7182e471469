//! Requests raised by interrupt handlers for the main loop

use crate::handoff::{Counter, Flag};

/// Everything the master's edge and timer interrupts hand to the loop
///
/// Button flags are raw edges; the loop debounces them against the pin
/// before acting. Encoder detents are already decoded and only counted.
pub struct PanelRequests {
    /// 250 ms display ticks since the loop last looked
    pub ticks: Counter,
    /// Menu button edge
    pub menu: Flag,
    /// Encoder switch edge
    pub confirm: Flag,
    /// Trip reset button edge
    pub reset: Flag,
    /// Turn stalk edge (either direction)
    pub turn: Flag,
    /// Bluetooth button edge
    pub bluetooth: Flag,
    /// Watchdog hang-test switch edge
    pub hang_test: Flag,
    /// Clockwise detents
    pub clockwise: Counter,
    /// Counter-clockwise detents
    pub counter_clockwise: Counter,
}

impl PanelRequests {
    /// Create an empty request set
    pub const fn new() -> Self {
        Self {
            ticks: Counter::new(),
            menu: Flag::new(),
            confirm: Flag::new(),
            reset: Flag::new(),
            turn: Flag::new(),
            bluetooth: Flag::new(),
            hang_test: Flag::new(),
            clockwise: Counter::new(),
            counter_clockwise: Counter::new(),
        }
    }
}

impl Default for PanelRequests {
    fn default() -> Self {
        Self::new()
    }
}
