//! Slave actuator tick
//!
//! One call per base tick drains what the dispatcher posted, watches the
//! master's keepalives, then steps the needles and blinks the lamps.
//!
//! During a link outage the outputs are held safe: both needles head for
//! the stop and every lamp stays dark. The last requested targets and lamp
//! selections are kept and take effect again once keepalives return.

use crate::config::TimingConfig;
use crate::dispatch::SlaveShared;
use crate::gauge::{GaugeActuator, GaugeTargets};
use crate::lamp::SignalLampController;
use crate::safety::{LinkEvent, LinkMonitor};
use crate::traits::{CoilDriver, LampOutputs};

/// Gauges, lamps and link monitor of the slave board
#[derive(Debug, Clone)]
pub struct SlaveActuator {
    gauges: GaugeActuator,
    signals: SignalLampController,
    link: LinkMonitor,
    /// Last targets the master asked for
    requested: GaugeTargets,
}

impl SlaveActuator {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            gauges: GaugeActuator::new(),
            signals: SignalLampController::new(timing.blink_divider),
            link: LinkMonitor::new(timing.link_window_ms),
            requested: GaugeTargets::default(),
        }
    }

    /// Start the boot sweep; drive it with [`home_tick`](Self::home_tick)
    pub fn begin_homing(&mut self, steps: u16) {
        self.gauges.begin_homing(steps);
    }

    /// Step the boot sweep, returning true once both needles are parked
    pub fn home_tick<R: CoilDriver, M: CoilDriver>(&mut self, rpm: &mut R, mph: &mut M) -> bool {
        self.gauges.tick(rpm, mph);
        self.gauges.is_idle()
    }

    /// Run one base tick
    ///
    /// Returns a link state change for the caller to report.
    pub fn tick<R, M, L>(
        &mut self,
        shared: &SlaveShared,
        delta_ms: u32,
        rpm: &mut R,
        mph: &mut M,
        lamps: &mut L,
    ) -> Option<LinkEvent>
    where
        R: CoilDriver,
        M: CoilDriver,
        L: LampOutputs,
    {
        if let Some(targets) = shared.gauge.take() {
            self.requested = targets;
            if self.link.is_up() {
                self.gauges.set_targets(targets);
            }
        }
        if let Some(turn) = shared.turn.take() {
            self.signals.set_turn(turn, lamps);
        }
        if let Some(proximity) = shared.proximity.take() {
            self.signals.set_warning(proximity, lamps);
        }

        let restored = if shared.keepalive.take() {
            self.link.keepalive()
        } else {
            None
        };
        let event = restored.or_else(|| self.link.advance(delta_ms));

        match event {
            Some(LinkEvent::Lost { .. }) => {
                self.gauges.set_targets(GaugeTargets::default());
                self.signals.suspend(lamps);
            }
            Some(LinkEvent::Restored) => {
                self.gauges.set_targets(self.requested);
                self.signals.resume();
            }
            None => {}
        }

        self.gauges.tick(rpm, mph);
        self.signals.tick(lamps);
        event
    }

    pub fn gauges(&self) -> &GaugeActuator {
        &self.gauges
    }

    pub fn signals(&self) -> &SignalLampController {
        &self.signals
    }

    /// Returns true while the master's keepalives arrive in time
    pub fn link_up(&self) -> bool {
        self.link.is_up()
    }
}
