//! State shared between the link task and the actuator tick
//!
//! The link task is the only writer; the actuator task is the only reader.

use cluster_core::dispatch::SlaveShared;

/// Latest gauge targets, lamp selections and the keepalive flag
pub static SHARED: SlaveShared = SlaveShared::new();
