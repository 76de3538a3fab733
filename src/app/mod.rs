//! Application core — pure domain logic, zero I/O.
//!
//! This module holds the business rules for the smart-factory kit: drum
//! counting, the gate release cycle, index-wheel control, and the reset
//! protocol.  All interaction with hardware happens through the **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
