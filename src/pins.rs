//! GPIO / peripheral pin assignments for the ETboard smart-factory kit.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Kit silkscreen labels (D4, D7, A2, …) are noted
//! next to each ESP32 GPIO so the board manual stays easy to cross-reference.

// ---------------------------------------------------------------------------
// Servos (SG90-class, 50 Hz PWM via LEDC)
// ---------------------------------------------------------------------------

/// Blocking-gate servo signal (kit label D4).
pub const GATE_SERVO_GPIO: i32 = 25;
/// Index-wheel (gear) servo signal (kit label D5).
pub const GEAR_SERVO_GPIO: i32 = 26;

// ---------------------------------------------------------------------------
// Ultrasonic ranger (HC-SR04 style)
// ---------------------------------------------------------------------------

/// Echo input (kit label D8).
pub const ECHO_GPIO: i32 = 14;
/// Trigger output (kit label D9).
pub const TRIG_GPIO: i32 = 12;

/// Echo pulse timeout.  30 ms ≈ 5 m round trip — far beyond the conveyor,
/// so a timeout always means "nothing in range".
pub const ECHO_TIMEOUT_US: u32 = 30_000;

// ---------------------------------------------------------------------------
// User button (active-low with pull-up, kit label D7)
// ---------------------------------------------------------------------------

/// Momentary push-button that advances the index wheel.
pub const BUTTON_GPIO: i32 = 27;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// CDS photoresistor divider (kit label A1). ADC1 channel 6 = GPIO 34.
pub const CDS_ADC_GPIO: i32 = 34;
/// NTC thermistor divider (kit label A2). ADC1 channel 7 = GPIO 35.
pub const NTC_ADC_GPIO: i32 = 35;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC base frequency for the servos (standard RC servo frame rate).
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
/// LEDC timer resolution (bits).  14-bit gives ~1.2 µs pulse granularity
/// at 50 Hz, comfortably below servo deadband.
pub const SERVO_PWM_RESOLUTION_BITS: u32 = 14;
