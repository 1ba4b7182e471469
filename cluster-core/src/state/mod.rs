//! Dashboard state machine
//!
//! Pure state transitions for the master's screen flow. The state is
//! persisted so the cluster comes back on the same screen after a reset.

mod events;
mod machine;

pub use events::{Event, MenuItem};
pub use machine::DashboardState;
