//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).  The
//! MQTT sink implements the same trait for the network side.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Prints an optional thermistor reading, or `n/a` when it read at a rail.
struct OptCelsius(Option<f32>);

impl core::fmt::Display for OptCelsius {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            Some(c) => write!(f, "{c:.1}C"),
            None => write!(f, "n/a"),
        }
    }
}

/// Prints an optional CDS reading, or `n/a` when it read at a rail.
struct OptLux(Option<f32>);

impl core::fmt::Display for OptLux {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.0 {
            Some(lux) => write!(f, "{lux:.0}lx"),
            None => write!(f, "n/a"),
        }
    }
}

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | distance={:.1}cm | temp={} | lux={} | count={} | pos={} | gate={}",
                    t.distance_cm,
                    OptCelsius(t.temperature_c),
                    OptLux(t.illuminance_lux),
                    t.count,
                    t.position,
                    t.gate.as_str(),
                );
            }
            AppEvent::DrumCounted(count) => {
                info!("DRUM  | counted, total={}", count);
            }
            AppEvent::GateChanged(state) => {
                info!("GATE  | {}", state.as_str());
            }
            AppEvent::PositionChanged(pos) => {
                info!("WHEEL | pos={}", pos);
            }
            AppEvent::SensorTypes => {
                info!("TYPES | sensor-type descriptors requested");
            }
            AppEvent::Started => {
                info!("START | control loop up");
            }
        }
    }
}
