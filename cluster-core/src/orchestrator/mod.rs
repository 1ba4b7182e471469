//! Master orchestration loop
//!
//! The orchestrator owns every master-side collaborator and runs one
//! iteration per pass of the firmware's main loop. Interrupt handlers only
//! raise [`PanelRequests`]; all slow work (debouncing, bus writes, EEPROM,
//! drawing) happens here.
//!
//! Iteration order:
//!
//! ```text
//! proximity opcode ─► speed opcode ─► backlight ─► watchdog ─► display ticks
//!        ─► menu / edit navigation ─► panel buttons ─► persist screen state
//! ```
//!
//! Protocol sends are fire-and-forget. A failed send is counted and
//! forgotten; the next iteration repeats the periodic opcodes anyway.

pub mod menu;
pub mod render;
pub mod requests;

pub use menu::{MenuConfirm, MenuNavigator, MenuPhase};
pub use requests::PanelRequests;

use cluster_protocol::{Command, TurnSignal};

use crate::clock::{CalendarDate, EditCursor, TimeOfDay};
use crate::config::ClusterConfig;
use crate::input::Debouncer;
use crate::persist::{self, PersistedRecord, TripOdometer};
use crate::sensor::SensorSnapshot;
use crate::state::{DashboardState, Event, MenuItem};
use crate::traits::{
    Button, ButtonPanel, ByteStore, ClockError, ClockService, CommandSink, DisplayError,
    DrawTarget, PanelOutputs, StoreError,
};

/// Blink phases per cycle; phase 1 shows the highlighted item
const BLINK_PHASES: u8 = 3;
const BLINK_VISIBLE: u8 = 1;

/// Errors surfaced by one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OrchestratorError {
    /// Persistent store failed
    Store(StoreError),
    /// Display failed
    Display(DisplayError),
    /// Clock failed
    Clock(ClockError),
}

impl From<StoreError> for OrchestratorError {
    fn from(e: StoreError) -> Self {
        OrchestratorError::Store(e)
    }
}

impl From<DisplayError> for OrchestratorError {
    fn from(e: DisplayError) -> Self {
        OrchestratorError::Display(e)
    }
}

impl From<ClockError> for OrchestratorError {
    fn from(e: ClockError) -> Self {
        OrchestratorError::Clock(e)
    }
}

/// Master-side collaborators
pub struct MasterIo<B, S, C, D, P, O> {
    /// Link to the slave
    pub bus: B,
    /// EEPROM
    pub store: S,
    /// Real-time clock
    pub clock: C,
    /// TFT
    pub display: D,
    /// Switches
    pub panel: P,
    /// Backlight, bluetooth enable, watchdog
    pub outputs: O,
}

/// Master orchestrator
pub struct Orchestrator<B, S, C, D, P, O> {
    io: MasterIo<B, S, C, D, P, O>,
    config: ClusterConfig,
    debouncer: Debouncer,

    state: DashboardState,
    persisted_state: Option<DashboardState>,
    menu: MenuNavigator,
    cursor: EditCursor,
    time: TimeOfDay,
    date: CalendarDate,

    /// Blink phase, 0..BLINK_PHASES
    blink: u8,
    /// Display ticks toward the next full refresh
    refresh_count: u8,
    /// Display ticks left on the bluetooth banner
    banner_ticks: u8,

    bluetooth: bool,
    odometer: TripOdometer,
    last_mph: f32,

    hang_latched: bool,
    hang_fed: bool,
    dropped_commands: u32,
}

impl<B, S, C, D, P, O> Orchestrator<B, S, C, D, P, O>
where
    B: CommandSink,
    S: ByteStore,
    C: ClockService,
    D: DrawTarget,
    P: ButtonPanel,
    O: PanelOutputs,
{
    /// Create an orchestrator; call [`restore`](Self::restore) before iterating
    pub fn new(io: MasterIo<B, S, C, D, P, O>, config: ClusterConfig) -> Self {
        Self {
            io,
            debouncer: Debouncer::from_config(&config.ui),
            config,
            state: DashboardState::Menu,
            persisted_state: None,
            menu: MenuNavigator::new(),
            cursor: EditCursor::Idle,
            time: TimeOfDay::default(),
            date: CalendarDate::default(),
            blink: 0,
            refresh_count: 0,
            banner_ticks: 0,
            bluetooth: false,
            odometer: TripOdometer::default(),
            last_mph: 0.0,
            hang_latched: false,
            hang_fed: false,
            dropped_commands: 0,
        }
    }

    /// Restore the persisted record and bring the slave up to date
    ///
    /// Re-sends the stored turn signal, restores the screen and bluetooth
    /// flag, and replays the trip mileage as mileage ticks so the slave's
    /// odometer matches. Keepalives are interleaved with the replay so the
    /// slave's link monitor stays fed through a long one.
    pub fn restore(&mut self) -> Result<PersistedRecord, OrchestratorError> {
        let record = PersistedRecord::load(&mut self.io.store)?;

        if let Some(turn @ Command::Turn(_)) = Command::decode(record.turn_opcode) {
            self.send(turn);
        }

        self.state = record.state;
        self.persisted_state = Some(record.state);

        self.bluetooth = record.bluetooth;
        self.io.outputs.set_bluetooth(self.bluetooth);

        self.odometer = TripOdometer::new(record.miles);
        if record.miles == 0 {
            self.send(Command::TripReset);
        } else {
            let every = self.config.timing.replay_keepalive_every.max(1);
            for replayed in 1..=record.miles.min(self.config.ui.odometer_limit) {
                self.send(Command::MileageTick);
                if replayed % every == 0 {
                    self.send(Command::Keepalive);
                }
            }
        }

        self.enter_screen()?;
        Ok(record)
    }

    /// Run one main-loop iteration
    pub fn iterate(
        &mut self,
        requests: &PanelRequests,
        sensors: SensorSnapshot,
    ) -> Result<(), OrchestratorError> {
        self.send(Command::Proximity(sensors.proximity));
        self.send(Command::for_speed(sensors.mph));
        self.last_mph = sensors.mph;

        self.io.outputs.set_backlight(sensors.backlight);

        let ticks = requests.ticks.take();
        self.watchdog_step(requests, ticks);

        // Every tick runs even if one fails; the first error is reported
        let mut tick_error = None;
        for _ in 0..ticks {
            if let Err(e) = self.display_tick() {
                tick_error.get_or_insert(e);
            }
        }

        if requests.menu.take() && self.pressed(Button::Menu) {
            self.menu_button()?;
        }
        if requests.confirm.take() && self.pressed(Button::EncoderSwitch) {
            self.confirm()?;
        }
        self.rotate(requests.clockwise.take(), requests.counter_clockwise.take())?;

        if requests.turn.take() {
            self.turn_switch()?;
        }
        if requests.reset.take() && self.pressed(Button::TripReset) {
            self.reset_trip()?;
        }
        if requests.bluetooth.take() && self.pressed(Button::Bluetooth) {
            self.toggle_bluetooth()?;
        }

        // Written on change only; the stored byte always matches the screen
        if self.persisted_state != Some(self.state) {
            self.io
                .store
                .write(persist::SLOT_STATE, self.state.to_byte())?;
            self.persisted_state = Some(self.state);
        }

        match tick_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn send(&mut self, command: Command) {
        if self.io.bus.send(command.encode()).is_err() {
            self.dropped_commands = self.dropped_commands.wrapping_add(1);
        }
    }

    fn pressed(&mut self, button: Button) -> bool {
        let panel = &mut self.io.panel;
        self.debouncer.is_pressed(|| panel.is_low(button))
    }

    /// Keepalive once per display tick and a hardware feed every pass
    ///
    /// Once the hang-test switch latches, one last keepalive and feed go
    /// out and the hardware watchdog is left to reset the MCU.
    fn watchdog_step(&mut self, requests: &PanelRequests, ticks: u8) {
        if !self.hang_latched && requests.hang_test.take() && self.pressed(Button::HangTest) {
            self.hang_latched = true;
        }

        if self.hang_latched {
            if !self.hang_fed {
                self.send(Command::Keepalive);
                self.io.outputs.kick_watchdog();
                self.hang_fed = true;
            }
            return;
        }

        if ticks > 0 {
            self.send(Command::Keepalive);
        }
        self.io.outputs.kick_watchdog();
    }

    fn display_tick(&mut self) -> Result<(), OrchestratorError> {
        self.blink = (self.blink + 1) % BLINK_PHASES;
        let visible = self.blink == BLINK_VISIBLE;

        if self.state == DashboardState::Menu {
            if let Some(item) = self.menu.highlighted() {
                render::draw_menu_item(&mut self.io.display, item, visible)?;
            }
        } else if self.cursor.is_editing() {
            self.draw_edit_field(visible)?;
        }

        if self.banner_ticks > 0 {
            self.banner_ticks -= 1;
            if self.banner_ticks == 0 {
                render::draw_banner(&mut self.io.display, false)?;
            }
        }

        self.refresh_count += 1;
        if self.refresh_count >= self.config.timing.ticks_per_refresh {
            self.refresh_count = 0;
            self.refresh()?;
        }
        Ok(())
    }

    /// Once-a-second work: mileage, then a clock re-read
    fn refresh(&mut self) -> Result<(), OrchestratorError> {
        let seconds = (self.config.timing.display_tick_ms
            * self.config.timing.ticks_per_refresh as u32) as f32
            / 1000.0;
        let completed = self.odometer.accumulate(self.last_mph, seconds);
        if completed > 0 {
            persist::store_miles(&mut self.io.store, self.odometer.miles())?;
            for _ in 0..completed {
                self.send(Command::MileageTick);
            }
        }

        if !self.cursor.is_editing() {
            self.draw_value()?;
        }
        Ok(())
    }

    fn menu_button(&mut self) -> Result<(), OrchestratorError> {
        let next = self.state.transition(Event::MenuButton);
        if next == self.state {
            return Ok(());
        }
        self.state = next;
        self.menu.reset();
        self.cursor = EditCursor::Idle;
        self.enter_screen()
    }

    fn confirm(&mut self) -> Result<(), OrchestratorError> {
        match self.state {
            DashboardState::Menu => match self.menu.confirm() {
                MenuConfirm::Highlighting => Ok(()),
                MenuConfirm::Selected(item) => {
                    self.state = self.state.transition(Event::Select(item));
                    self.enter_screen()
                }
                MenuConfirm::Dismissed => render::draw_menu(&mut self.io.display).map_err(Into::into),
            },
            DashboardState::Time | DashboardState::Date => self.advance_cursor(),
            DashboardState::Temp => Ok(()),
        }
    }

    fn advance_cursor(&mut self) -> Result<(), OrchestratorError> {
        if self.cursor == EditCursor::Idle {
            self.read_clock()?;
        } else {
            self.draw_edit_field(true)?;
        }

        self.cursor = self.cursor.advance();
        if self.cursor == EditCursor::Commit {
            match self.state {
                DashboardState::Time => self.io.clock.write_time(&self.time)?,
                DashboardState::Date => self.io.clock.write_date(&self.date)?,
                _ => {}
            }
            self.cursor = EditCursor::Idle;
            self.draw_value()?;
        }
        Ok(())
    }

    fn rotate(&mut self, clockwise: u8, counter_clockwise: u8) -> Result<(), OrchestratorError> {
        if clockwise == 0 && counter_clockwise == 0 {
            return Ok(());
        }

        if self.state == DashboardState::Menu {
            if self.menu.rotate(clockwise, counter_clockwise) {
                render::draw_menu(&mut self.io.display)?;
            }
            return Ok(());
        }

        let steps = clockwise as i16 - counter_clockwise as i16;
        match (self.state, self.cursor.time_field(), self.cursor.date_field()) {
            (DashboardState::Time, Some(field), _) => self.time.adjust(field, steps),
            (DashboardState::Date, _, Some(field)) => self.date.adjust(field, steps),
            _ => return Ok(()),
        }
        self.draw_edit_field(true)
    }

    fn turn_switch(&mut self) -> Result<(), OrchestratorError> {
        let signal = if self.pressed(Button::TurnRight) {
            TurnSignal::Right
        } else if self.pressed(Button::TurnLeft) {
            TurnSignal::Left
        } else {
            TurnSignal::Off
        };
        let command = Command::Turn(signal);
        self.send(command);
        self.io.store.write(persist::SLOT_TURN, command.encode())?;
        Ok(())
    }

    fn reset_trip(&mut self) -> Result<(), OrchestratorError> {
        self.odometer.reset();
        persist::store_miles(&mut self.io.store, 0)?;
        self.send(Command::TripReset);
        Ok(())
    }

    fn toggle_bluetooth(&mut self) -> Result<(), OrchestratorError> {
        self.bluetooth = !self.bluetooth;
        self.io.outputs.set_bluetooth(self.bluetooth);
        self.io
            .store
            .write(persist::SLOT_BLUETOOTH, self.bluetooth as u8)?;
        self.banner_ticks = self.config.ui.banner_ticks;
        render::draw_banner(&mut self.io.display, true)?;
        Ok(())
    }

    fn read_clock(&mut self) -> Result<(), OrchestratorError> {
        match self.state {
            DashboardState::Time => self.time = self.io.clock.read_time()?,
            DashboardState::Date => self.date = self.io.clock.read_date()?,
            _ => {}
        }
        Ok(())
    }

    /// Clear and draw the current screen from scratch
    fn enter_screen(&mut self) -> Result<(), OrchestratorError> {
        render::clear(&mut self.io.display)?;
        match self.state {
            DashboardState::Menu => render::draw_menu(&mut self.io.display)?,
            _ => {
                render::draw_title(&mut self.io.display, self.state)?;
                self.draw_value()?;
            }
        }
        Ok(())
    }

    /// Re-read the clock and draw the value line of the current screen
    fn draw_value(&mut self) -> Result<(), OrchestratorError> {
        let display = &mut self.io.display;
        match self.state {
            DashboardState::Menu => {}
            DashboardState::Time => {
                self.time = self.io.clock.read_time()?;
                render::draw_time(display, &self.time)?;
            }
            DashboardState::Date => {
                self.date = self.io.clock.read_date()?;
                render::draw_date(display, &self.date)?;
            }
            DashboardState::Temp => {
                let celsius = self.io.clock.read_temperature()?;
                render::draw_temperature(display, celsius)?;
            }
        }
        Ok(())
    }

    fn draw_edit_field(&mut self, visible: bool) -> Result<(), OrchestratorError> {
        let display = &mut self.io.display;
        match self.state {
            DashboardState::Time => {
                if let Some(field) = self.cursor.time_field() {
                    render::draw_time_field(display, &self.time, field, visible)?;
                }
            }
            DashboardState::Date => {
                if let Some(field) = self.cursor.date_field() {
                    render::draw_date_field(display, &self.date, field, visible)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Current screen
    pub fn state(&self) -> DashboardState {
        self.state
    }

    /// Edit cursor
    pub fn cursor(&self) -> EditCursor {
        self.cursor
    }

    /// Menu item under the highlight
    pub fn highlighted(&self) -> Option<MenuItem> {
        self.menu.highlighted()
    }

    /// Time being shown or edited
    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    /// Bluetooth module enabled
    pub fn bluetooth(&self) -> bool {
        self.bluetooth
    }

    /// Whole trip miles
    pub fn trip_miles(&self) -> u16 {
        self.odometer.miles()
    }

    /// Sends that failed on the bus
    pub fn dropped_commands(&self) -> u32 {
        self.dropped_commands
    }

    /// Returns true once the hang test has stopped watchdog feeding
    pub fn hang_latched(&self) -> bool {
        self.hang_latched
    }

    /// Collaborators, for inspection
    pub fn io(&self) -> &MasterIo<B, S, C, D, P, O> {
        &self.io
    }

    /// Collaborators, mutable
    pub fn io_mut(&mut self) -> &mut MasterIo<B, S, C, D, P, O> {
        &mut self.io
    }
}
