//! Open-loop needle actuator
//!
//! Two unipolar steppers drive the tachometer and speedometer needles. There
//! is no position feedback: each channel counts the steps it has issued and
//! trusts that count. Needles move one at a time:
//!
//! ```text
//!   new targets ──► rpm needle steps ──► arrives ──► mph needle steps ──► idle
//!                   (one phase/tick)     hand-off    (one phase/tick)
//! ```
//!
//! At most one coil pattern changes per tick, which bounds the supply
//! current and the tick handler's runtime.

use crate::config::GaugeConfig;
use crate::handoff::Packed;
use crate::traits::CoilDriver;

use cluster_protocol::SpeedBucket;

/// Coil energizing sequence, full-step wave drive
pub const COIL_SEQUENCE: [u8; 4] = [0b0001, 0b0010, 0b0100, 0b1000];

/// Which needle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gauge {
    /// Tachometer
    Rpm,
    /// Speedometer
    Mph,
}

/// Motion state of one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorPhaseState {
    Idle,
    SteppingForward,
    SteppingReverse,
}

/// Step targets for both needles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GaugeTargets {
    /// Tachometer target in steps from the stop
    pub rpm: i16,
    /// Speedometer target in steps from the stop
    pub mph: i16,
}

impl GaugeTargets {
    /// Targets for a received speed bucket
    pub fn for_bucket(bucket: SpeedBucket, config: &GaugeConfig) -> Self {
        let (rpm, mph) = config.targets_for(bucket.breakpoint_mph());
        Self {
            rpm: rpm as i16,
            mph: mph as i16,
        }
    }
}

impl Packed for GaugeTargets {
    fn pack(self) -> u32 {
        ((self.rpm as u16 as u32) << 16) | self.mph as u16 as u32
    }

    fn unpack(raw: u32) -> Self {
        Self {
            rpm: (raw >> 16) as u16 as i16,
            mph: raw as u16 as i16,
        }
    }
}

/// One stepper channel
#[derive(Debug, Clone)]
pub struct StepperChannel {
    /// Steps issued from the stop
    position: i32,
    /// Commanded position
    target: i32,
    /// Index into [`COIL_SEQUENCE`] of the energized coil
    phase: u8,
    motion: MotorPhaseState,
}

impl StepperChannel {
    fn new() -> Self {
        Self {
            position: 0,
            target: 0,
            // First forward step energizes IN1
            phase: 3,
            motion: MotorPhaseState::Idle,
        }
    }

    /// Point the motion flag at the target
    fn aim(&mut self) {
        self.motion = if self.target > self.position {
            MotorPhaseState::SteppingForward
        } else if self.target < self.position {
            MotorPhaseState::SteppingReverse
        } else {
            MotorPhaseState::Idle
        };
    }

    /// Issue one step toward the target, returning the coil pattern
    fn step(&mut self) -> Option<u8> {
        match self.motion {
            MotorPhaseState::SteppingForward if self.position < self.target => {
                self.position += 1;
                self.phase = (self.phase + 1) % 4;
            }
            MotorPhaseState::SteppingReverse if self.position > self.target => {
                self.position -= 1;
                self.phase = (self.phase + 3) % 4;
            }
            _ => return None,
        }
        Some(COIL_SEQUENCE[self.phase as usize])
    }

    fn arrived(&self) -> bool {
        self.position == self.target
    }

    /// Steps issued from the stop
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Commanded position
    pub fn target(&self) -> i32 {
        self.target
    }

    /// Current motion state
    pub fn motion(&self) -> MotorPhaseState {
        self.motion
    }
}

/// Sequential two-needle actuator
#[derive(Debug, Clone)]
pub struct GaugeActuator {
    rpm: StepperChannel,
    mph: StepperChannel,
    /// Needle allowed to move this tick
    active: Option<Gauge>,
}

impl Default for GaugeActuator {
    fn default() -> Self {
        Self::new()
    }
}

impl GaugeActuator {
    /// Create an actuator with both needles assumed at the stop
    pub fn new() -> Self {
        Self {
            rpm: StepperChannel::new(),
            mph: StepperChannel::new(),
            active: None,
        }
    }

    /// Accept new targets
    ///
    /// The tachometer moves first. If it is already on target the
    /// speedometer is engaged straight away.
    pub fn set_targets(&mut self, targets: GaugeTargets) {
        self.rpm.target = targets.rpm as i32;
        self.mph.target = targets.mph as i32;

        self.rpm.aim();
        if self.rpm.arrived() {
            self.engage_mph();
        } else {
            self.mph.motion = MotorPhaseState::Idle;
            self.active = Some(Gauge::Rpm);
        }
    }

    /// Park both needles against their stops
    ///
    /// Assumes each needle is at most `steps` from the stop and drives it
    /// that far in reverse; the stop absorbs the excess. Both counters read
    /// zero once the sweep finishes.
    pub fn begin_homing(&mut self, steps: u16) {
        self.rpm.position = steps as i32;
        self.mph.position = steps as i32;
        self.set_targets(GaugeTargets::default());
    }

    /// Advance the convergence by one tick
    ///
    /// Returns the needle that stepped, if any.
    pub fn tick<R: CoilDriver, M: CoilDriver>(
        &mut self,
        rpm_coils: &mut R,
        mph_coils: &mut M,
    ) -> Option<Gauge> {
        match self.active? {
            Gauge::Rpm => {
                let pattern = self.rpm.step();
                if let Some(pattern) = pattern {
                    rpm_coils.energize(pattern);
                }
                if self.rpm.arrived() {
                    self.rpm.motion = MotorPhaseState::Idle;
                    self.engage_mph();
                }
                pattern.map(|_| Gauge::Rpm)
            }
            Gauge::Mph => {
                let pattern = self.mph.step();
                if let Some(pattern) = pattern {
                    mph_coils.energize(pattern);
                }
                if self.mph.arrived() {
                    self.mph.motion = MotorPhaseState::Idle;
                    self.active = None;
                }
                pattern.map(|_| Gauge::Mph)
            }
        }
    }

    /// Hand the direction flag to the speedometer
    fn engage_mph(&mut self) {
        self.mph.aim();
        self.active = if self.mph.arrived() {
            None
        } else {
            Some(Gauge::Mph)
        };
    }

    /// Needle currently allowed to move
    pub fn active(&self) -> Option<Gauge> {
        self.active
    }

    /// Returns true when both needles are on target
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Channel state for one needle
    pub fn channel(&self, gauge: Gauge) -> &StepperChannel {
        match gauge {
            Gauge::Rpm => &self.rpm,
            Gauge::Mph => &self.mph,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Coils {
        last: u8,
        steps: u32,
    }

    impl CoilDriver for Coils {
        fn energize(&mut self, pattern: u8) {
            self.last = pattern;
            self.steps += 1;
        }
    }

    #[test]
    fn test_forty_ticks_then_handoff() {
        let mut gauges = GaugeActuator::new();
        let (mut rpm, mut mph) = (Coils::default(), Coils::default());
        gauges.set_targets(GaugeTargets { rpm: 40, mph: 46 });

        for tick in 1..=39 {
            assert_eq!(gauges.tick(&mut rpm, &mut mph), Some(Gauge::Rpm));
            assert_eq!(gauges.active(), Some(Gauge::Rpm), "tick {}", tick);
        }

        assert_eq!(gauges.tick(&mut rpm, &mut mph), Some(Gauge::Rpm));
        assert_eq!(gauges.channel(Gauge::Rpm).position(), 40);
        assert_eq!(gauges.active(), Some(Gauge::Mph));
        assert_eq!(rpm.steps, 40);
        assert_eq!(mph.steps, 0);

        assert_eq!(gauges.tick(&mut rpm, &mut mph), Some(Gauge::Mph));
        assert_eq!(gauges.channel(Gauge::Rpm).position(), 40);
    }

    #[test]
    fn test_counter_never_passes_target() {
        let mut gauges = GaugeActuator::new();
        let (mut rpm, mut mph) = (Coils::default(), Coils::default());
        gauges.set_targets(GaugeTargets { rpm: 12, mph: 14 });

        for _ in 0..100 {
            gauges.tick(&mut rpm, &mut mph);
            assert!(gauges.channel(Gauge::Rpm).position() <= 12);
            assert!(gauges.channel(Gauge::Mph).position() <= 14);
        }
        assert!(gauges.is_idle());
        assert_eq!(gauges.channel(Gauge::Mph).position(), 14);
    }

    #[test]
    fn test_one_motor_per_tick() {
        let mut gauges = GaugeActuator::new();
        let (mut rpm, mut mph) = (Coils::default(), Coils::default());
        gauges.set_targets(GaugeTargets { rpm: 5, mph: 5 });

        let mut ticks = 0;
        while !gauges.is_idle() {
            let before = rpm.steps + mph.steps;
            gauges.tick(&mut rpm, &mut mph);
            assert_eq!(rpm.steps + mph.steps, before + 1);
            ticks += 1;
        }
        assert_eq!(ticks, 10);
    }

    #[test]
    fn test_coil_sequence_wraps() {
        let mut gauges = GaugeActuator::new();
        let (mut rpm, mut mph) = (Coils::default(), Coils::default());
        gauges.set_targets(GaugeTargets { rpm: 5, mph: 0 });

        let mut seen = [0u8; 5];
        for slot in seen.iter_mut() {
            gauges.tick(&mut rpm, &mut mph);
            *slot = rpm.last;
        }
        assert_eq!(seen, [0b0001, 0b0010, 0b0100, 0b1000, 0b0001]);

        // Reverse walks the table backwards
        gauges.set_targets(GaugeTargets { rpm: 3, mph: 0 });
        gauges.tick(&mut rpm, &mut mph);
        assert_eq!(rpm.last, 0b1000);
        gauges.tick(&mut rpm, &mut mph);
        assert_eq!(rpm.last, 0b0100);
    }

    #[test]
    fn test_rpm_on_target_engages_mph() {
        let mut gauges = GaugeActuator::new();
        gauges.set_targets(GaugeTargets { rpm: 0, mph: 8 });
        assert_eq!(gauges.active(), Some(Gauge::Mph));
    }

    #[test]
    fn test_homing_parks_both_needles() {
        let mut gauges = GaugeActuator::new();
        let (mut rpm, mut mph) = (Coils::default(), Coils::default());
        gauges.begin_homing(400);

        let mut ticks = 0;
        while !gauges.is_idle() {
            gauges.tick(&mut rpm, &mut mph);
            ticks += 1;
        }
        assert_eq!(ticks, 800);
        assert_eq!(gauges.channel(Gauge::Rpm).position(), 0);
        assert_eq!(gauges.channel(Gauge::Mph).position(), 0);
    }

    #[test]
    fn test_targets_for_bucket() {
        let targets = GaugeTargets::for_bucket(SpeedBucket::clamped(7), &GaugeConfig::default());
        assert_eq!(targets, GaugeTargets { rpm: 122, mph: 140 });
        assert_eq!(GaugeTargets::unpack(targets.pack()), targets);
    }
}
