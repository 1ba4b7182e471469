//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations.

pub mod actuator;
pub mod bus;
pub mod clock;
pub mod display;
pub mod panel;
pub mod store;

pub use actuator::{CoilDriver, Lamp, LampOutputs};
pub use bus::{BusError, CommandSink};
pub use clock::{ClockError, ClockService};
pub use display::{Color, DisplayError, DrawTarget, NumericDisplay};
pub use panel::{Button, ButtonPanel, PanelOutputs};
pub use store::{ByteStore, StoreError};
