use cluster_core::clock::edit::cycle;
use cluster_core::gauge::{Gauge, GaugeActuator, GaugeTargets};
use cluster_core::orchestrator::MenuNavigator;
use cluster_core::traits::CoilDriver;
use proptest::prelude::*;

struct NullCoils;

impl CoilDriver for NullCoils {
    fn energize(&mut self, _pattern: u8) {}
}

proptest! {
    #[test]
    fn cycle_stays_in_range(value in 0u8..=99, steps in -200i16..200, min in 0u8..10, span in 1u8..60) {
        let max = min + span;
        let next = cycle(value, steps, min, max);
        prop_assert!(next >= min && next <= max);
    }

    #[test]
    fn cycle_round_trips_inside_range(value in 1u8..=59, steps in -120i16..120) {
        let there = cycle(value, steps, 1, 59);
        prop_assert_eq!(cycle(there, -steps, 1, 59), value);
    }

    #[test]
    fn needles_settle_on_target(
        first_rpm in 0i16..350, first_mph in 0i16..400,
        rpm in 0i16..350, mph in 0i16..400,
        interrupt_after in 0u32..600,
    ) {
        let mut gauges = GaugeActuator::new();
        gauges.set_targets(GaugeTargets { rpm: first_rpm, mph: first_mph });
        for _ in 0..interrupt_after {
            gauges.tick(&mut NullCoils, &mut NullCoils);
        }

        gauges.set_targets(GaugeTargets { rpm, mph });
        let budget = 2 * (350 + 400);
        for _ in 0..budget {
            if gauges.is_idle() {
                break;
            }
            gauges.tick(&mut NullCoils, &mut NullCoils);
        }

        prop_assert!(gauges.is_idle());
        prop_assert_eq!(gauges.channel(Gauge::Rpm).position(), rpm as i32);
        prop_assert_eq!(gauges.channel(Gauge::Mph).position(), mph as i32);
    }

    #[test]
    fn menu_selection_in_range(turns in proptest::collection::vec((0u8..8, 0u8..8), 0..20)) {
        let mut nav = MenuNavigator::new();
        nav.confirm();
        for (cw, ccw) in turns {
            nav.rotate(cw, ccw);
            prop_assert!(nav.selection() <= 3);
        }
    }
}
