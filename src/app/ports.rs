//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, event sinks, display, storage)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::config::SystemConfig;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// A point-in-time reading of every sensor on the kit.
#[derive(Debug, Clone, Copy)]
pub struct SensorSnapshot {
    /// Ultrasonic range in cm.  `0.0` means the echo timed out, i.e.
    /// nothing in range.
    pub distance_cm: f32,
    /// NTC temperature.  `None` when the divider reads at a rail.
    pub temperature_c: Option<f32>,
    /// CDS illuminance estimate.  `None` when the divider reads at a rail.
    pub illuminance_lux: Option<f32>,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            distance_cm: 0.0,
            temperature_c: None,
            illuminance_lux: None,
        }
    }
}

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Trigger a ranging cycle and read every sensor.
    fn read_all(&mut self) -> SensorSnapshot;

    /// Current raw button level (`true` = held down).
    fn button_pressed(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command the two servos.
pub trait ActuatorPort {
    /// Drive the blocking-gate servo to `angle` degrees (0–180).
    fn set_gate_angle(&mut self, angle: u8);

    /// Drive the index-wheel gear servo to `angle` degrees (0–180).
    fn set_gear_angle(&mut self, angle: u8);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → OLED / console)
// ───────────────────────────────────────────────────────────────

/// Line-oriented status display.
pub trait DisplayPort {
    /// Replace the whole display with `lines`, top to bottom.
    fn render(&mut self, lines: &[&str]);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, MQTT).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate config values before persisting; invalid
/// ranges are rejected with [`ConfigError::ValidationFailed`], not silently
/// clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`SystemConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<SystemConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &SystemConfig) -> Result<(), ConfigError>;
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed the deserialization check.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
