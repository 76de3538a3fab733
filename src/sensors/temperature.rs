//! NTC thermistor conversion (Steinhart-Hart).
//!
//! The kit wires a 10 kΩ NTC in a divider against a 10 kΩ fixed resistor on
//! a 12-bit ADC.  Coefficients are the stock values for the bundled
//! thermistor; they are not per-unit calibrated.

/// Fixed divider resistor (ohms).
const R1: f32 = 10_000.0;

// Steinhart-Hart coefficients for the bundled 10k NTC.
const C1: f32 = 1.009_249_522e-3;
const C2: f32 = 2.378_405_444e-4;
const C3: f32 = 2.019_202_697e-7;

/// Convert a raw 12-bit ADC reading to degrees Celsius.
///
/// Returns `None` for rail readings (0 or 4095) where the divider math
/// degenerates, which in practice means the thermistor is disconnected.
pub fn celsius_from_raw(raw: u16) -> Option<f32> {
    if raw == 0 || raw >= 4095 {
        return None;
    }
    let r2 = R1 * (4095.0 / f32::from(raw) - 1.0);
    let log_r2 = r2.ln();
    let kelvin = 1.0 / (C1 + C2 * log_r2 + C3 * log_r2 * log_r2 * log_r2);
    Some(kelvin - 273.15)
}
