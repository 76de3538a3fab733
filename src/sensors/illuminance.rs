//! CDS photoresistor conversion.
//!
//! The kit wires the CDS cell against a 1 kΩ fixed resistor on a 3.3 V rail.
//! The lux estimate uses the cell's nominal 500 lux·kΩ transfer curve; it is
//! a classroom-grade approximation, not a calibrated measurement.

/// ADC reference voltage.
const V_REF: f32 = 3.3;
/// Fixed divider resistor (ohms).
const R_FIXED: f32 = 1_000.0;

/// Convert a raw 12-bit ADC reading to approximate lux.
///
/// Returns `None` for rail readings where the divider math degenerates
/// (pitch dark saturates low, direct sun saturates high).
pub fn lux_from_raw(raw: u16) -> Option<f32> {
    if raw == 0 || raw >= 4095 {
        return None;
    }
    let v = f32::from(raw) * V_REF / 4095.0;
    let cds_ohms = (V_REF - v) * R_FIXED / v;
    Some(500.0 / (cds_ohms / 1000.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_reading() {
        // raw 2047 ≈ half rail, so the CDS resistance equals the fixed 1 kΩ
        // and the estimate lands at the 500 lux nominal point
        let lux = lux_from_raw(2047).unwrap();
        assert!((lux - 500.0).abs() < 2.0, "got {lux}");
    }

    #[test]
    fn brighter_means_higher_raw() {
        // CDS resistance drops with light, pulling the divider tap up
        let dim = lux_from_raw(500).unwrap();
        let bright = lux_from_raw(3500).unwrap();
        assert!(bright > dim);
    }

    #[test]
    fn rail_readings_are_rejected() {
        assert!(lux_from_raw(0).is_none());
        assert!(lux_from_raw(4095).is_none());
    }
}
