//! Watchdog window model
//!
//! Mirrors an independent watchdog: it must be fed at least once per reload
//! window. Every window that passes without a feed is reported exactly once.
//! On the master the hardware peripheral performs the actual reset; this
//! model drives the slave's link monitor and the host tests.

/// Result of advancing the watchdog clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchdogStatus {
    /// Still inside the current window
    Armed,
    /// One or more windows elapsed without a feed
    Expired {
        /// Windows missed during this advance
        missed: u32,
    },
}

/// Reload-window watchdog
#[derive(Debug, Clone)]
pub struct Watchdog {
    /// Reload window length (ms)
    window_ms: u32,
    /// Time since the last feed or expiry (ms)
    elapsed_ms: u32,
    /// Total windows missed since creation
    expirations: u32,
}

impl Watchdog {
    /// Create a watchdog with the given reload window
    pub fn new(window_ms: u32) -> Self {
        Self {
            window_ms: window_ms.max(1),
            elapsed_ms: 0,
            expirations: 0,
        }
    }

    /// Restart the current window
    pub fn feed(&mut self) {
        self.elapsed_ms = 0;
    }

    /// Advance the watchdog clock
    ///
    /// # Arguments
    /// - `delta_ms`: Time elapsed since the last advance
    pub fn advance(&mut self, delta_ms: u32) -> WatchdogStatus {
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);

        let missed = self.elapsed_ms / self.window_ms;
        if missed == 0 {
            return WatchdogStatus::Armed;
        }

        self.elapsed_ms %= self.window_ms;
        self.expirations = self.expirations.saturating_add(missed);
        WatchdogStatus::Expired { missed }
    }

    /// Total windows missed since creation
    pub fn expirations(&self) -> u32 {
        self.expirations
    }

    /// Time left in the current window (ms)
    pub fn remaining_ms(&self) -> u32 {
        self.window_ms - self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fed_watchdog_stays_armed() {
        let mut dog = Watchdog::new(1000);
        for _ in 0..20 {
            assert_eq!(dog.advance(250), WatchdogStatus::Armed);
            dog.feed();
        }
        assert_eq!(dog.expirations(), 0);
    }

    #[test]
    fn test_fires_once_per_missed_window() {
        let mut dog = Watchdog::new(1000);
        let mut fired = 0;

        // 3 seconds without a feed, in 250 ms steps
        for _ in 0..12 {
            if let WatchdogStatus::Expired { missed } = dog.advance(250) {
                assert_eq!(missed, 1);
                fired += 1;
            }
        }

        assert_eq!(fired, 3);
        assert_eq!(dog.expirations(), 3);
    }

    #[test]
    fn test_long_stall_counts_every_window() {
        let mut dog = Watchdog::new(1000);
        assert_eq!(dog.advance(2500), WatchdogStatus::Expired { missed: 2 });
        assert_eq!(dog.remaining_ms(), 500);
    }

    #[test]
    fn test_feed_restarts_window() {
        let mut dog = Watchdog::new(1000);
        dog.advance(900);
        dog.feed();
        assert_eq!(dog.advance(900), WatchdogStatus::Armed);
        assert_eq!(dog.advance(100), WatchdogStatus::Expired { missed: 1 });
    }
}
