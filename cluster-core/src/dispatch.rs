//! Slave command dispatcher
//!
//! Runs in the bus receive context. Each byte is decoded and routed to the
//! mailboxes the actuator tick drains; the dispatcher itself never steps a
//! motor or switches a lamp. The seven-segment readout is updated here
//! because it is only ever written from this context.
//!
//! Digit layout (position 0 is leftmost):
//!
//! ```text
//! ┌───┬───┬───┬───┬───┬───┬───┬───┐
//! │ bucket│ blank │   trip miles  │
//! └───┴───┴───┴───┴───┴───┴───┴───┘
//! ```

use cluster_protocol::{Command, Proximity, TurnSignal};

use crate::config::{GaugeConfig, UiConfig};
use crate::gauge::GaugeTargets;
use crate::handoff::{Flag, Mailbox};
use crate::traits::{DisplayError, NumericDisplay};

/// First digit of the bucket readout
const BUCKET_DIGIT: u8 = 0;
/// First digit of the odometer readout
const ODOMETER_DIGIT: u8 = 4;
/// Odometer width
const ODOMETER_WIDTH: u8 = 4;

/// State shared between the dispatcher and the actuator tick
pub struct SlaveShared {
    /// Latest needle targets
    pub gauge: Mailbox<GaugeTargets>,
    /// Latest turn signal selection
    pub turn: Mailbox<TurnSignal>,
    /// Latest proximity state
    pub proximity: Mailbox<Proximity>,
    /// Keepalive seen since the monitor last looked
    pub keepalive: Flag,
}

impl SlaveShared {
    /// Create empty shared state
    pub const fn new() -> Self {
        Self {
            gauge: Mailbox::new(),
            turn: Mailbox::new(),
            proximity: Mailbox::new(),
            keepalive: Flag::new(),
        }
    }
}

impl Default for SlaveShared {
    fn default() -> Self {
        Self::new()
    }
}

/// Receive-side command router
pub struct Dispatcher<'a> {
    shared: &'a SlaveShared,
    gauge: GaugeConfig,
    odometer_limit: u16,
    odometer: u16,
    previous: Option<Command>,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher posting into `shared`
    pub fn new(shared: &'a SlaveShared, gauge: GaugeConfig, ui: &UiConfig) -> Self {
        Self {
            shared,
            gauge,
            odometer_limit: ui.odometer_limit,
            odometer: 0,
            previous: None,
        }
    }

    /// Draw the idle readout
    pub fn show_initial<D: NumericDisplay>(&self, digits: &mut D) -> Result<(), DisplayError> {
        digits.write_number(BUCKET_DIGIT, 2, 0)?;
        digits.write_digit(2, None)?;
        digits.write_digit(3, None)?;
        digits.write_number(ODOMETER_DIGIT, ODOMETER_WIDTH, self.odometer)
    }

    /// Handle one received byte
    ///
    /// Returns the decoded command, or `None` for the idle byte and unknown
    /// opcodes (which are dropped without side effects).
    pub fn dispatch<D: NumericDisplay>(
        &mut self,
        byte: u8,
        digits: &mut D,
    ) -> Result<Option<Command>, DisplayError> {
        let Some(command) = Command::decode(byte) else {
            return Ok(None);
        };

        let repeated = self.previous == Some(command);
        self.previous = Some(command);

        match command {
            Command::Speed(bucket) => {
                self.shared
                    .gauge
                    .post(GaugeTargets::for_bucket(bucket, &self.gauge));
                if !repeated {
                    digits.write_number(BUCKET_DIGIT, 2, bucket.index() as u16)?;
                }
            }
            Command::Turn(signal) => self.shared.turn.post(signal),
            Command::Proximity(state) => self.shared.proximity.post(state),
            Command::MileageTick => {
                self.odometer = (self.odometer + 1).min(self.odometer_limit);
                digits.write_number(ODOMETER_DIGIT, ODOMETER_WIDTH, self.odometer)?;
            }
            Command::TripReset => {
                self.odometer = 0;
                digits.write_number(ODOMETER_DIGIT, ODOMETER_WIDTH, 0)?;
            }
            Command::Keepalive => self.shared.keepalive.raise(),
        }

        Ok(Some(command))
    }

    /// Previously dispatched command
    pub fn previous(&self) -> Option<Command> {
        self.previous
    }

    /// Trip miles shown on the readout
    pub fn odometer(&self) -> u16 {
        self.odometer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cluster_protocol::SpeedBucket;

    struct Digits {
        cells: [Option<u8>; 8],
        writes: u32,
    }

    impl Digits {
        fn new() -> Self {
            Self {
                cells: [None; 8],
                writes: 0,
            }
        }
    }

    impl NumericDisplay for Digits {
        const DIGITS: u8 = 8;

        fn write_digit(&mut self, position: u8, digit: Option<u8>) -> Result<(), DisplayError> {
            let cell = self
                .cells
                .get_mut(position as usize)
                .ok_or(DisplayError::OutOfBounds)?;
            *cell = digit;
            self.writes += 1;
            Ok(())
        }
    }

    fn dispatcher(shared: &SlaveShared) -> Dispatcher<'_> {
        Dispatcher::new(shared, GaugeConfig::default(), &UiConfig::default())
    }

    #[test]
    fn test_speed_posts_targets_and_digits() {
        let shared = SlaveShared::new();
        let mut dispatcher = dispatcher(&shared);
        let mut digits = Digits::new();

        let cmd = dispatcher.dispatch(0x54, &mut digits).unwrap();
        assert_eq!(cmd, Some(Command::Speed(SpeedBucket::clamped(14))));
        // Bucket 14 starts at the 75 mph breakpoint
        assert_eq!(shared.gauge.take(), Some(GaugeTargets { rpm: 262, mph: 300 }));
        assert_eq!(&digits.cells[..2], &[Some(1), Some(4)]);
    }

    #[test]
    fn test_signals_go_to_mailboxes() {
        let shared = SlaveShared::new();
        let mut dispatcher = dispatcher(&shared);
        let mut digits = Digits::new();

        dispatcher.dispatch(0x42, &mut digits).unwrap();
        dispatcher.dispatch(0x61, &mut digits).unwrap();
        dispatcher.dispatch(0x91, &mut digits).unwrap();

        assert_eq!(shared.turn.take(), Some(TurnSignal::Left));
        assert_eq!(shared.proximity.take(), Some(Proximity::Warning));
        assert!(shared.keepalive.take());
        assert_eq!(digits.writes, 0);
    }

    #[test]
    fn test_idle_and_unknown_bytes_dropped() {
        let shared = SlaveShared::new();
        let mut dispatcher = dispatcher(&shared);
        let mut digits = Digits::new();

        assert_eq!(dispatcher.dispatch(0x00, &mut digits).unwrap(), None);
        assert_eq!(dispatcher.dispatch(0xA7, &mut digits).unwrap(), None);
        assert!(!shared.gauge.has_pending());
        assert_eq!(dispatcher.previous(), None);
    }

    #[test]
    fn test_odometer_counts_and_resets() {
        let shared = SlaveShared::new();
        let mut dispatcher = dispatcher(&shared);
        let mut digits = Digits::new();

        for _ in 0..12 {
            dispatcher.dispatch(0x11, &mut digits).unwrap();
        }
        assert_eq!(dispatcher.odometer(), 12);
        assert_eq!(&digits.cells[4..], &[Some(0), Some(0), Some(1), Some(2)]);

        dispatcher.dispatch(0x10, &mut digits).unwrap();
        assert_eq!(dispatcher.odometer(), 0);
        assert_eq!(&digits.cells[4..], &[Some(0); 4]);
    }

    #[test]
    fn test_repeated_speed_reposts_targets() {
        let shared = SlaveShared::new();
        let mut dispatcher = dispatcher(&shared);
        let mut digits = Digits::new();

        dispatcher.dispatch(0x33, &mut digits).unwrap();
        shared.gauge.take();
        let writes = digits.writes;

        dispatcher.dispatch(0x33, &mut digits).unwrap();
        assert!(shared.gauge.has_pending());
        assert_eq!(digits.writes, writes);
    }
}
