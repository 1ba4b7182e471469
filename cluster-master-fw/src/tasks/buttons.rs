//! Panel switch edges
//!
//! One task instance per switch. An edge only raises the switch's request
//! flag; the controller debounces against the pin level before it acts, so
//! bounces here are harmless.

use defmt::*;
use embassy_stm32::exti::ExtiInput;

use cluster_core::handoff::Flag;
use cluster_core::traits::Button;

/// Number of edge-driven switches on the panel
pub const SWITCHES: usize = 7;

/// Edges that raise a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum Trigger {
    /// Push buttons (press only)
    Falling,
    /// Latching turn stalk (engage and release)
    Both,
}

/// Switch edge task
#[embassy_executor::task(pool_size = SWITCHES)]
pub async fn button_task(
    button: Button,
    trigger: Trigger,
    mut pin: ExtiInput<'static>,
    flag: &'static Flag,
) {
    info!("Button task started for {:?} ({:?})", button, trigger);

    loop {
        match trigger {
            Trigger::Falling => pin.wait_for_falling_edge().await,
            Trigger::Both => pin.wait_for_any_edge().await,
        }
        trace!("{:?} edge", button);
        flag.raise();
    }
}
