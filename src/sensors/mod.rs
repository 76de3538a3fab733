//! Sensor conversion math.
//!
//! Raw-reading-to-engineering-unit conversions, separated from the drivers
//! that produce the raw readings so they can be unit tested on the host.

pub mod illuminance;
pub mod temperature;
pub mod ultrasonic;
