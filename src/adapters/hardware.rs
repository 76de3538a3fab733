//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns both servos, the button, and the raw sensor reads, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only module
//! in the system that touches actual hardware.  On non-espidf targets the
//! underlying drivers are inert stubs, so the adapter compiles everywhere
//! and the domain logic is exercised through mock ports in tests.

use crate::app::ports::{ActuatorPort, SensorPort, SensorSnapshot};
use crate::drivers::button::ButtonDriver;
use crate::drivers::hw_init;
use crate::drivers::ranger;
use crate::drivers::servo::ServoDriver;
use crate::sensors::{illuminance, temperature, ultrasonic};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    gate_servo: ServoDriver,
    gear_servo: ServoDriver,
    button: ButtonDriver,
}

impl HardwareAdapter {
    pub fn new() -> Self {
        Self {
            gate_servo: ServoDriver::gate(),
            gear_servo: ServoDriver::gear(),
            button: ButtonDriver::new(),
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_all(&mut self) -> SensorSnapshot {
        let echo_us = ranger::measure_echo_us();
        SensorSnapshot {
            distance_cm: ultrasonic::distance_cm(echo_us),
            temperature_c: temperature::celsius_from_raw(hw_init::adc1_read(hw_init::ADC1_CH_NTC)),
            illuminance_lux: illuminance::lux_from_raw(hw_init::adc1_read(hw_init::ADC1_CH_CDS)),
        }
    }

    fn button_pressed(&mut self) -> bool {
        self.button.is_pressed()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_gate_angle(&mut self, angle: u8) {
        self.gate_servo.set_angle(angle);
    }

    fn set_gear_angle(&mut self, angle: u8) {
        self.gear_servo.set_angle(angle);
    }
}
