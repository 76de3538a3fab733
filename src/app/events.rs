//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them — log to serial, publish over MQTT, or both.

use crate::control::GateState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The application service has started.
    Started,

    /// A drum passed the ranger and was counted (carries the new total).
    DrumCounted(u32),

    /// The gate moved (automatic cycle or remote command).
    GateChanged(GateState),

    /// The index wheel moved (button or remote command).
    PositionChanged(u8),

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The sensor-type descriptors should be (re)published.
    SensorTypes,
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy)]
pub struct TelemetryData {
    pub distance_cm: f32,
    /// `None` when the thermistor divider read at a rail.
    pub temperature_c: Option<f32>,
    /// `None` when the CDS divider read at a rail.
    pub illuminance_lux: Option<f32>,
    pub count: u32,
    pub position: u8,
    pub gate: GateState,
}

/// Registry entry describing one reported quantity for the classroom
/// server's sensor catalogue.
#[derive(Debug, Clone, Copy)]
pub struct SensorTypeInfo {
    /// Key suffix the value is published under.
    pub sensor_id: &'static str,
    pub sensor_type: &'static str,
    /// Human-readable nickname (Korean, matching the kit's workbook).
    pub nickname: &'static str,
    pub channel_code: &'static str,
    pub collect_unit: &'static str,
}

/// Everything this kit reports to the classroom server.
pub const SENSOR_TYPES: [SensorTypeInfo; 2] = [
    SensorTypeInfo {
        sensor_id: "distance",
        sensor_type: "distance",
        nickname: "거리",
        channel_code: "01",
        collect_unit: "cm",
    },
    SensorTypeInfo {
        sensor_id: "count",
        sensor_type: "count",
        nickname: "드럼통 출고 수",
        channel_code: "01",
        collect_unit: "",
    },
];
