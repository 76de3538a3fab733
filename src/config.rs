//! System configuration parameters
//!
//! All tunable parameters for the smart-factory kit, collapsing the per-kit
//! firmware variants into one profile: servo calibration table, detection
//! window, gate timings, topic naming, and the telemetry report shape are
//! all selected here at startup.  Values can be overridden via NVS.

use serde::{Deserialize, Serialize};

/// Number of discrete index-wheel positions.
pub const WHEEL_POSITIONS: usize = 4;

/// Shape of the long-cadence telemetry publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportProfile {
    /// Key/value sensor-data pairs (`distance`, `count`) in the kit's
    /// classroom-server scheme.
    KeyValue,
    /// A single `{"pos": <int>}` JSON document on the cloud topic.
    CloudJson,
}

/// Outbound/inbound topic naming, configurable per deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topics {
    /// Drum counter topic (`<drum>/count` carries the integer count).
    pub drum: String,
    /// Gate topic (`<block>/state` carries `"open"`/`"close"`; also the
    /// inbound gate command topic).
    pub block: String,
    /// Index-wheel topic (`<pos>/state` carries 0–3; also the inbound
    /// set-position command topic).
    pub pos: String,
    /// Inbound full-reset command topic.
    pub reset: String,
    /// Periodic sensor-data JSON publish topic.
    pub sensor_data: String,
    /// Sensor-type descriptor publish topic.
    pub sensor_types: String,
    /// Inbound request topic for the sensor-type descriptors.
    pub get_sensor_type: String,
    /// Fixed topic for the `CloudJson` report profile.
    pub cloud: String,
}

impl Default for Topics {
    fn default() -> Self {
        Self {
            drum: "drum".into(),
            block: "block".into(),
            pos: "pos".into(),
            reset: "reset".into(),
            sensor_data: "sensor_data".into(),
            sensor_types: "sensor_types".into(),
            get_sensor_type: "get_sensor_type".into(),
            cloud: "aws/etboard".into(),
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    /// Firmware version string shown on display line 1.
    pub firmware_version: String,

    // --- Servo calibration ---
    /// Gear servo angle for each index-wheel position (degrees).
    pub gear_angles: [u8; WHEEL_POSITIONS],
    /// Gate servo angle when open (degrees).
    pub gate_open_angle: u8,
    /// Gate servo angle when closed (degrees).
    pub gate_closed_angle: u8,

    // --- Drum-pass detection ---
    /// Lower bound of the detection window (cm, exclusive).
    pub detect_min_cm: f32,
    /// Upper bound of the detection window (cm, exclusive).
    pub detect_max_cm: f32,
    /// Minimum interval between two accepted detections (ms).
    pub debounce_ms: u32,

    // --- Gate cycle ---
    /// Delay between an accepted detection and the gate opening, letting
    /// the drum clear the sensor (ms).
    pub gate_clearing_ms: u32,
    /// How long the gate stays open before closing (ms).
    pub gate_open_hold_ms: u32,

    // --- Timing ---
    /// Control loop interval (ms).
    pub control_loop_interval_ms: u32,
    /// Display refresh interval (ms) — the "short" periodic cadence.
    pub display_interval_ms: u32,
    /// Telemetry publish interval (ms) — the "long" periodic cadence.
    pub report_interval_ms: u32,

    // --- Messaging ---
    pub topics: Topics,
    pub report: ReportProfile,

    // --- Connectivity ---
    pub wifi_ssid: String,
    pub wifi_password: String,
    pub mqtt_broker_url: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            firmware_version: "smartFty_0.94".into(),

            // Servo calibration (per-kit factory values)
            gear_angles: [180, 138, 102, 64],
            gate_open_angle: 75,
            gate_closed_angle: 0,

            // Detection
            detect_min_cm: 2.0,
            detect_max_cm: 8.0,
            debounce_ms: 500,

            // Gate cycle
            gate_clearing_ms: 500,
            gate_open_hold_ms: 1000,

            // Timing
            control_loop_interval_ms: 100, // 10 Hz sensing
            display_interval_ms: 1000,     // 1 s display refresh
            report_interval_ms: 5000,      // 5 s telemetry

            topics: Topics::default(),
            report: ReportProfile::KeyValue,

            wifi_ssid: "etboard".into(),
            wifi_password: String::new(),
            mqtt_broker_url: "mqtt://192.168.0.2:1883".into(),
        }
    }
}
