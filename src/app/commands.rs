//! Inbound commands to the application service.
//!
//! These represent actions requested by the outside world (MQTT, serial)
//! that the [`AppService`](super::service::AppService) interprets and acts
//! upon.  The [`router`](crate::router) translates raw topic/payload pairs
//! into these commands.

use crate::control::GateState;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Move the index wheel to a requested position (wraps modulo 4).
    SetPosition(u8),

    /// Drive the gate to a fixed state, outside the automatic cycle.
    SetGate(GateState),

    /// Full state reset: count, wheel position, and gate all return to
    /// their power-on values and the state burst is republished.
    Reset,

    /// Publish the sensor-type descriptors.
    ReportSensorTypes,
}
