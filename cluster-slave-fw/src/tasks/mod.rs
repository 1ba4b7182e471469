//! Embassy async tasks

pub mod actuator;
pub mod link;

pub use actuator::actuator_task;
pub use link::link_task;
