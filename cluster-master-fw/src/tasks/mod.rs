//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

pub mod buttons;
pub mod controller;
pub mod encoder;
pub mod hall;
pub mod light;
pub mod sonar;
pub mod tick;

pub use buttons::button_task;
pub use controller::controller_task;
pub use encoder::encoder_task;
pub use hall::hall_task;
pub use light::light_task;
pub use sonar::sonar_task;
pub use tick::tick_task;
