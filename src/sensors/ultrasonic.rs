//! HC-SR04 echo-pulse-to-distance conversion.

/// Sentinel distance returned when no echo arrived before the timeout.
/// Zero is strictly below the detection window so a timeout can never be
/// mistaken for a drum.
pub const NO_ECHO_CM: f32 = 0.0;

/// Convert a round-trip echo pulse width to centimetres.
///
/// Speed of sound at room temperature is ~340 m/s, i.e. 29.4 µs/cm one way,
/// giving distance = duration / 58.8 = duration * 17 / 1000.
pub fn distance_cm(echo_duration_us: u32) -> f32 {
    17.0 * echo_duration_us as f32 / 1000.0
}
