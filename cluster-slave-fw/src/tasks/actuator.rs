//! Actuator tick
//!
//! Runs at the base tick (1 ms). Parks both needles at boot, then hands
//! every tick to the core actuator, which applies whatever the link task
//! posted, steps at most one needle phase and advances the lamp blink
//! prescaler.
//!
//! The master sends a keepalive every display tick. When a whole link
//! window passes without one the needles head for zero and the lamps stay
//! dark; the last requested state comes back with the next keepalive.

use defmt::*;
use embassy_stm32::gpio::Output;
use embassy_time::{Duration, Ticker};

use cluster_core::config::ClusterConfig;
use cluster_core::safety::LinkEvent;
use cluster_core::slave::SlaveActuator;
use cluster_drivers::lamp::GpioLamps;
use cluster_drivers::stepper::UnipolarCoils;
use cluster_hal::Compat;

use crate::channels::SHARED;

/// Four coil pins of one gauge motor
pub type Coils = UnipolarCoils<Compat<Output<'static>>>;

/// Turn and warning lamps
pub type Lamps = GpioLamps<Compat<Output<'static>>>;

/// Actuator task
#[embassy_executor::task]
pub async fn actuator_task(
    mut rpm_coils: Coils,
    mut mph_coils: Coils,
    mut lamps: Lamps,
    config: ClusterConfig,
) {
    info!("Actuator task started");

    let tick_ms = config.timing.gauge_tick_ms.max(1);
    let mut ticker = Ticker::every(Duration::from_millis(tick_ms as u64));
    let mut actuator = SlaveActuator::new(&config.timing);

    info!("Homing needles ({} steps each)", config.gauge.homing_steps);
    actuator.begin_homing(config.gauge.homing_steps);
    loop {
        ticker.next().await;
        if actuator.home_tick(&mut rpm_coils, &mut mph_coils) {
            break;
        }
    }
    info!("Needles parked");

    loop {
        ticker.next().await;

        match actuator.tick(&SHARED, tick_ms, &mut rpm_coils, &mut mph_coils, &mut lamps) {
            Some(LinkEvent::Lost { missed }) => {
                warn!("Link lost ({} window missed), failing safe", missed);
            }
            Some(LinkEvent::Restored) => {
                info!("Link restored");
            }
            None => {}
        }
    }
}
