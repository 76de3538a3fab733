//! Adapters — the outer ring of the hexagonal architecture.
//!
//! Each adapter implements one or more of the port traits in
//! [`crate::app::ports`] against a concrete backend: real peripherals,
//! the serial console, NVS flash, or the MQTT client.

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod mqtt;
pub mod nvs;
pub mod time;
#[cfg(target_os = "espidf")]
pub mod wifi;
