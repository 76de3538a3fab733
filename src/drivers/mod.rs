//! Hardware drivers.
//!
//! Thin, dumb peripheral wrappers over the one-shot init helpers in
//! [`hw_init`].  No domain logic lives here; the application core decides
//! what to do and these drivers just move registers.
//!
//! ## Dual-target design
//!
//! On ESP-IDF the drivers hit real registers.  On the host every hw_init
//! helper is a no-op returning inert values, so the same driver code
//! compiles and the domain logic is exercised through mock ports instead.

pub mod button;
pub mod hw_init;
pub mod ranger;
pub mod servo;
