//! Pure control-logic building blocks.
//!
//! Everything in this module is hardware-free and time-parameterised: callers
//! pass in the current uptime in milliseconds and the modules return what
//! should happen.  This keeps the drum detector, gate cycle and index wheel
//! fully testable on the host.

pub mod detector;
pub mod gate;
pub mod wheel;

pub use detector::DrumPassDetector;
pub use gate::{GateAction, GateCycle, GateState};
pub use wheel::IndexWheel;
