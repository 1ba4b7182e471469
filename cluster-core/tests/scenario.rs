//! Master to slave, end to end, over an in-memory bus

use core::cell::RefCell;

use cluster_core::clock::{CalendarDate, TimeOfDay};
use cluster_core::config::ClusterConfig;
use cluster_core::dispatch::{Dispatcher, SlaveShared};
use cluster_core::gauge::{Gauge, GaugeActuator};
use cluster_core::lamp::SignalLampController;
use cluster_core::orchestrator::{MasterIo, Orchestrator, PanelRequests};
use cluster_core::safety::LinkEvent;
use cluster_core::sensor::{BacklightLevel, SensorSnapshot};
use cluster_core::slave::SlaveActuator;
use cluster_core::traits::*;
use cluster_protocol::{Proximity, TurnSignal};
use heapless::Vec;

/// Wire capacity, enough for a four-figure mileage replay
const WIRE: usize = 2048;

/// Bytes on the wire, shared by both ends
struct Wire(RefCell<Vec<u8, WIRE>>);

struct Sender<'a>(&'a Wire);

impl CommandSink for Sender<'_> {
    fn send(&mut self, opcode: u8) -> Result<(), BusError> {
        self.0 .0.borrow_mut().push(opcode).map_err(|_| BusError::Bus)
    }
}

struct Store([u8; 8]);

impl ByteStore for Store {
    fn read(&mut self, address: u8) -> Result<u8, StoreError> {
        self.0.get(address as usize).copied().ok_or(StoreError::OutOfRange)
    }

    fn write(&mut self, address: u8, value: u8) -> Result<(), StoreError> {
        *self.0.get_mut(address as usize).ok_or(StoreError::OutOfRange)? = value;
        Ok(())
    }
}

struct Clock;

impl ClockService for Clock {
    fn read_time(&mut self) -> Result<TimeOfDay, ClockError> {
        Ok(TimeOfDay::default())
    }

    fn read_date(&mut self) -> Result<CalendarDate, ClockError> {
        Ok(CalendarDate::default())
    }

    fn read_temperature(&mut self) -> Result<i8, ClockError> {
        Ok(21)
    }

    fn write_time(&mut self, _: &TimeOfDay) -> Result<(), ClockError> {
        Ok(())
    }

    fn write_date(&mut self, _: &CalendarDate) -> Result<(), ClockError> {
        Ok(())
    }
}

struct Screen;

impl DrawTarget for Screen {
    fn fill_rect(&mut self, _: u16, _: u16, _: u16, _: u16, _: Color) -> Result<(), DisplayError> {
        Ok(())
    }

    fn draw_char(&mut self, _: u16, _: u16, _: char, _: Color, _: Color, _: u8) -> Result<(), DisplayError> {
        Ok(())
    }
}

struct Panel(Option<Button>);

impl ButtonPanel for Panel {
    fn is_low(&mut self, button: Button) -> bool {
        self.0 == Some(button)
    }
}

struct Outputs;

impl PanelOutputs for Outputs {
    fn set_backlight(&mut self, _: BacklightLevel) {}
    fn set_bluetooth(&mut self, _: bool) {}
    fn kick_watchdog(&mut self) {}
}

struct Digits([Option<u8>; 8]);

impl NumericDisplay for Digits {
    const DIGITS: u8 = 8;

    fn write_digit(&mut self, position: u8, digit: Option<u8>) -> Result<(), DisplayError> {
        *self.0.get_mut(position as usize).ok_or(DisplayError::OutOfBounds)? = digit;
        Ok(())
    }
}

#[derive(Default)]
struct Coils(u32);

impl CoilDriver for Coils {
    fn energize(&mut self, _pattern: u8) {
        self.0 += 1;
    }
}

#[derive(Default)]
struct Lamps([bool; 3]);

impl LampOutputs for Lamps {
    fn set_lamp(&mut self, lamp: Lamp, on: bool) {
        self.0[lamp as usize] = on;
    }

    fn is_lit(&self, lamp: Lamp) -> bool {
        self.0[lamp as usize]
    }
}

/// Drain the wire into the dispatcher
fn deliver(wire: &Wire, dispatcher: &mut Dispatcher<'_>, digits: &mut Digits) {
    let bytes: Vec<u8, WIRE> = core::mem::take(&mut *wire.0.borrow_mut());
    for byte in bytes {
        dispatcher.dispatch(byte, digits).unwrap();
    }
}

#[test]
fn test_speed_reaches_the_needles() {
    let config = ClusterConfig::default();
    let wire = Wire(RefCell::new(Vec::new()));
    let shared = SlaveShared::new();

    let io = MasterIo {
        bus: Sender(&wire),
        store: Store([0xFF; 8]),
        clock: Clock,
        display: Screen,
        panel: Panel(None),
        outputs: Outputs,
    };
    let mut master = Orchestrator::new(io, config);
    master.restore().unwrap();

    let mut dispatcher = Dispatcher::new(&shared, config.gauge, &config.ui);
    let mut digits = Digits([None; 8]);
    dispatcher.show_initial(&mut digits).unwrap();
    deliver(&wire, &mut dispatcher, &mut digits);

    let requests = PanelRequests::new();
    let sensors = SensorSnapshot {
        mph: 37.0,
        proximity: Proximity::Warning,
        backlight: BacklightLevel::Full,
    };
    master.iterate(&requests, sensors).unwrap();
    assert_eq!(wire.0.borrow().as_slice(), &[0x61, 0x37]);
    deliver(&wire, &mut dispatcher, &mut digits);

    assert_eq!(&digits.0[..2], &[Some(0), Some(7)]);
    assert_eq!(&digits.0[4..], &[Some(0); 4]);

    let mut gauges = GaugeActuator::new();
    let mut lamps = SignalLampController::new(config.timing.blink_divider);
    let (mut rpm, mut mph) = (Coils::default(), Coils::default());
    let mut bank = Lamps::default();

    if let Some(targets) = shared.gauge.take() {
        gauges.set_targets(targets);
    }
    if let Some(state) = shared.proximity.take() {
        lamps.set_warning(state, &mut bank);
    }

    let mut ticks = 0;
    while !gauges.is_idle() {
        gauges.tick(&mut rpm, &mut mph);
        lamps.tick(&mut bank);
        ticks += 1;
    }

    // 35 mph breakpoint: 122 tachometer steps, then 140 speedometer steps
    assert_eq!(rpm.0, 122);
    assert_eq!(mph.0, 140);
    assert_eq!(ticks, 262);
    assert_eq!(gauges.channel(Gauge::Mph).position(), 140);
    assert!(bank.is_lit(Lamp::Warning));
}

#[test]
fn test_restored_mileage_shows_on_slave() {
    let config = ClusterConfig::default();
    let wire = Wire(RefCell::new(Vec::new()));
    let shared = SlaveShared::new();

    let io = MasterIo {
        bus: Sender(&wire),
        store: Store([0x41, 0, 0, 0xFF, 42, 0, 0, 0]),
        clock: Clock,
        display: Screen,
        panel: Panel(None),
        outputs: Outputs,
    };
    let mut master = Orchestrator::new(io, config);
    master.restore().unwrap();

    let mut dispatcher = Dispatcher::new(&shared, config.gauge, &config.ui);
    let mut digits = Digits([None; 8]);
    deliver(&wire, &mut dispatcher, &mut digits);

    assert_eq!(dispatcher.odometer(), 42);
    assert_eq!(&digits.0[4..], &[Some(0), Some(0), Some(4), Some(2)]);
    assert_eq!(shared.turn.take(), Some(TurnSignal::Right));
}

#[test]
fn test_long_replay_keeps_slave_link_up() {
    let config = ClusterConfig::default();
    let wire = Wire(RefCell::new(Vec::new()));
    let shared = SlaveShared::new();

    // Right turn stored, 1200 trip miles
    let io = MasterIo {
        bus: Sender(&wire),
        store: Store([0x41, 0, 0, 0xFF, 0xB0, 0x04, 0, 0]),
        clock: Clock,
        display: Screen,
        panel: Panel(None),
        outputs: Outputs,
    };
    let mut master = Orchestrator::new(io, config);
    master.restore().unwrap();

    let mut dispatcher = Dispatcher::new(&shared, config.gauge, &config.ui);
    let mut digits = Digits([None; 8]);
    let mut slave = SlaveActuator::new(&config.timing);
    let (mut rpm, mut mph) = (Coils::default(), Coils::default());
    let mut bank = Lamps::default();

    // One byte delivered per slave tick, slower than the real bus
    let bytes: Vec<u8, WIRE> = core::mem::take(&mut *wire.0.borrow_mut());
    assert!(bytes.len() > config.timing.link_window_ms as usize);

    let mut lost = 0;
    let mut right_lit = 0;
    for byte in bytes {
        dispatcher.dispatch(byte, &mut digits).unwrap();
        if let Some(LinkEvent::Lost { .. }) = slave.tick(&shared, 1, &mut rpm, &mut mph, &mut bank)
        {
            lost += 1;
        }
        if bank.is_lit(Lamp::Right) {
            right_lit += 1;
        }
    }

    assert_eq!(lost, 0);
    assert!(slave.link_up());
    assert!(right_lit > 0);
    assert_eq!(slave.signals().turn(), TurnSignal::Right);
    assert_eq!(dispatcher.odometer(), 1200);
    assert_eq!(&digits.0[4..], &[Some(1), Some(2), Some(0), Some(0)]);
}
