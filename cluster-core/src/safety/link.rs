//! Master link monitor
//!
//! The slave expects a keepalive opcode at least once per link window.
//! The monitor turns the raw window model into edges: one `Lost` when the
//! first window is missed and one `Restored` on the next keepalive, however
//! long the outage lasts.

use super::watchdog::{Watchdog, WatchdogStatus};

/// Link state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// A whole window passed without a keepalive
    Lost {
        /// Windows missed by the advance that noticed it
        missed: u32,
    },
    /// Keepalive seen again after an outage
    Restored,
}

/// Keepalive monitor
#[derive(Debug, Clone)]
pub struct LinkMonitor {
    watchdog: Watchdog,
    up: bool,
    outages: u32,
}

impl LinkMonitor {
    /// Create a monitor that starts with the link up
    pub fn new(window_ms: u32) -> Self {
        Self {
            watchdog: Watchdog::new(window_ms),
            up: true,
            outages: 0,
        }
    }

    /// Record a keepalive
    pub fn keepalive(&mut self) -> Option<LinkEvent> {
        self.watchdog.feed();
        if self.up {
            return None;
        }
        self.up = true;
        Some(LinkEvent::Restored)
    }

    /// Advance the window clock
    pub fn advance(&mut self, delta_ms: u32) -> Option<LinkEvent> {
        match self.watchdog.advance(delta_ms) {
            WatchdogStatus::Expired { missed } if self.up => {
                self.up = false;
                self.outages = self.outages.saturating_add(1);
                Some(LinkEvent::Lost { missed })
            }
            _ => None,
        }
    }

    /// Returns true while keepalives arrive in time
    pub fn is_up(&self) -> bool {
        self.up
    }

    /// Outages seen since creation
    pub fn outages(&self) -> u32 {
        self.outages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steady_keepalives_never_report() {
        let mut link = LinkMonitor::new(1000);
        for ms in 0..5000u32 {
            if ms % 250 == 0 {
                assert_eq!(link.keepalive(), None);
            }
            assert_eq!(link.advance(1), None);
        }
        assert!(link.is_up());
    }

    #[test]
    fn test_outage_reported_once() {
        let mut link = LinkMonitor::new(1000);
        let mut lost = 0;
        for _ in 0..3500 {
            if let Some(LinkEvent::Lost { missed }) = link.advance(1) {
                assert_eq!(missed, 1);
                lost += 1;
            }
        }
        assert_eq!(lost, 1);
        assert!(!link.is_up());
        assert_eq!(link.outages(), 1);
    }

    #[test]
    fn test_keepalive_restores_link() {
        let mut link = LinkMonitor::new(1000);
        assert_eq!(link.advance(1000), Some(LinkEvent::Lost { missed: 1 }));
        assert_eq!(link.keepalive(), Some(LinkEvent::Restored));
        assert_eq!(link.keepalive(), None);
        assert_eq!(link.advance(999), None);
        assert!(link.is_up());

        assert_eq!(link.advance(1), Some(LinkEvent::Lost { missed: 1 }));
        assert_eq!(link.outages(), 2);
    }
}
