//! SG90-class hobby servo driver.
//!
//! Converts a 0–180° angle to an LEDC duty value on the shared 50 Hz
//! servo timer.  Pulse width spans 500–2500 µs across the angle range,
//! which matches the kit's bundled servos end to end.

use crate::drivers::hw_init;
use crate::pins;

/// Pulse width at 0° (µs).
const PULSE_MIN_US: u32 = 500;
/// Pulse width at 180° (µs).
const PULSE_MAX_US: u32 = 2500;
/// LEDC frame period at 50 Hz (µs).
const FRAME_US: u32 = 20_000;

pub struct ServoDriver {
    channel: u32,
    angle: u8,
}

impl ServoDriver {
    /// Driver for the blocking-gate servo (LEDC CH0).
    pub fn gate() -> Self {
        Self {
            channel: hw_init::LEDC_CH_GATE,
            angle: 0,
        }
    }

    /// Driver for the index-wheel gear servo (LEDC CH1).
    pub fn gear() -> Self {
        Self {
            channel: hw_init::LEDC_CH_GEAR,
            angle: 0,
        }
    }

    /// Drive the horn to `angle` degrees, clamped to 0–180.
    pub fn set_angle(&mut self, angle: u8) {
        let angle = angle.min(180);
        hw_init::ledc_set(self.channel, duty_for_angle(angle));
        self.angle = angle;
    }

    /// Last commanded angle.
    pub fn angle(&self) -> u8 {
        self.angle
    }
}

/// Map an angle to a raw LEDC duty at the servo timer resolution.
fn duty_for_angle(angle: u8) -> u32 {
    let span = PULSE_MAX_US - PULSE_MIN_US;
    let pulse_us = PULSE_MIN_US + span * u32::from(angle) / 180;
    let max_duty = (1u32 << pins::SERVO_PWM_RESOLUTION_BITS) - 1;
    // u64 keeps the intermediate product comfortably inside range
    ((u64::from(pulse_us) * u64::from(max_duty)) / u64::from(FRAME_US)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duty_endpoints() {
        // 500 µs / 20 ms at 14-bit = ~409; 2500 µs = ~2047
        assert_eq!(duty_for_angle(0), 409);
        assert_eq!(duty_for_angle(180), 2047);
    }

    #[test]
    fn duty_is_monotonic() {
        let mut prev = duty_for_angle(0);
        for a in 1..=180u8 {
            let d = duty_for_angle(a);
            assert!(d >= prev, "duty dropped at {a}");
            prev = d;
        }
    }

    #[test]
    fn set_angle_clamps() {
        let mut s = ServoDriver::gate();
        s.set_angle(250);
        assert_eq!(s.angle(), 180);
    }

    #[test]
    fn tracks_commanded_angle() {
        let mut s = ServoDriver::gear();
        s.set_angle(138);
        assert_eq!(s.angle(), 138);
    }
}
