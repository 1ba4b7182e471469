//! Turn and warning lamp blinking
//!
//! Runs off the same base tick as the gauge actuator. A prescaler turns the
//! fast tick into blink phases; each active indicator alternates between
//! lit and dark on every phase boundary. Indicators that are off keep their
//! lamps dark and their counters still.
//!
//! While suspended every lamp is held dark but the selections are kept, so
//! blinking picks up where it left off once the controller resumes.

use cluster_protocol::{Proximity, TurnSignal};

use crate::traits::{Lamp, LampOutputs};

/// Blink counter phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkPhase {
    /// Lamp lit
    On,
    /// Lamp dark
    Off,
}

impl BlinkPhase {
    fn next(self) -> Self {
        match self {
            BlinkPhase::On => BlinkPhase::Off,
            BlinkPhase::Off => BlinkPhase::On,
        }
    }
}

/// Signal lamp controller
#[derive(Debug, Clone)]
pub struct SignalLampController {
    turn: TurnSignal,
    warning: Proximity,
    turn_phase: BlinkPhase,
    warning_phase: BlinkPhase,
    /// Base ticks per blink phase
    divider: u16,
    prescaler: u16,
    suspended: bool,
}

impl SignalLampController {
    /// Create a controller with everything off
    ///
    /// # Arguments
    /// - `divider`: base ticks per blink phase
    pub fn new(divider: u16) -> Self {
        Self {
            turn: TurnSignal::Off,
            warning: Proximity::Clear,
            turn_phase: BlinkPhase::Off,
            warning_phase: BlinkPhase::Off,
            divider: divider.max(1),
            prescaler: 0,
            suspended: false,
        }
    }

    /// Apply a turn signal command
    ///
    /// Repeating the current selection keeps the blink rhythm. Any change
    /// darkens both turn lamps at once; a new side lights on the next phase.
    pub fn set_turn<L: LampOutputs>(&mut self, signal: TurnSignal, lamps: &mut L) {
        if signal == self.turn {
            return;
        }
        self.turn = signal;
        self.turn_phase = BlinkPhase::Off;
        lamps.set_lamp(Lamp::Left, false);
        lamps.set_lamp(Lamp::Right, false);
    }

    /// Apply a proximity command
    pub fn set_warning<L: LampOutputs>(&mut self, warning: Proximity, lamps: &mut L) {
        if warning == self.warning {
            return;
        }
        self.warning = warning;
        self.warning_phase = BlinkPhase::Off;
        lamps.set_lamp(Lamp::Warning, false);
    }

    /// Hold every lamp dark, keeping the current selections
    pub fn suspend<L: LampOutputs>(&mut self, lamps: &mut L) {
        self.suspended = true;
        self.turn_phase = BlinkPhase::Off;
        self.warning_phase = BlinkPhase::Off;
        self.prescaler = 0;
        lamps.set_lamp(Lamp::Left, false);
        lamps.set_lamp(Lamp::Right, false);
        lamps.set_lamp(Lamp::Warning, false);
    }

    /// Resume blinking whatever is selected
    ///
    /// Active lamps light on the next phase boundary.
    pub fn resume(&mut self) {
        self.suspended = false;
    }

    /// Returns true while the lamps are held dark
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Advance by one base tick
    pub fn tick<L: LampOutputs>(&mut self, lamps: &mut L) {
        if self.suspended {
            return;
        }
        self.prescaler += 1;
        if self.prescaler < self.divider {
            return;
        }
        self.prescaler = 0;

        if let Some(lamp) = self.turn_lamp() {
            self.turn_phase = self.turn_phase.next();
            lamps.set_lamp(lamp, self.turn_phase == BlinkPhase::On);
        }

        if self.warning.is_warning() {
            self.warning_phase = self.warning_phase.next();
            lamps.set_lamp(Lamp::Warning, self.warning_phase == BlinkPhase::On);
        }
    }

    fn turn_lamp(&self) -> Option<Lamp> {
        match self.turn {
            TurnSignal::Off => None,
            TurnSignal::Left => Some(Lamp::Left),
            TurnSignal::Right => Some(Lamp::Right),
        }
    }

    /// Current turn selection
    pub fn turn(&self) -> TurnSignal {
        self.turn
    }

    /// Current proximity selection
    pub fn warning(&self) -> Proximity {
        self.warning
    }

    /// Current turn blink phase
    pub fn turn_phase(&self) -> BlinkPhase {
        self.turn_phase
    }
}
