//! Operator input handling
//!
//! Interrupts only record edges (see [`crate::handoff`]); the decisions made
//! from them, sampling a switch thirty times or decoding a detent, happen in
//! loop context with the helpers here.

pub mod debounce;
pub mod encoder;

pub use debounce::Debouncer;
pub use encoder::{QuadratureDecoder, Rotation};
