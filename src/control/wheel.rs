//! Four-position index wheel.
//!
//! The wheel maps a logical position 0–3 to a calibrated gear-servo angle.
//! Every mutation wraps the position modulo the table length, so the stored
//! position is always a valid table index regardless of what a remote
//! command requested.

use crate::config::WHEEL_POSITIONS;

/// Logical index-wheel state plus its servo calibration table.
#[derive(Debug, Clone)]
pub struct IndexWheel {
    position: u8,
    angles: [u8; WHEEL_POSITIONS],
}

impl IndexWheel {
    pub fn new(angles: [u8; WHEEL_POSITIONS]) -> Self {
        Self { position: 0, angles }
    }

    /// Step to the next position, wrapping 3 -> 0.
    pub fn advance(&mut self) -> u8 {
        self.set(self.position.wrapping_add(1))
    }

    /// Jump to a requested position.  Out-of-range requests wrap modulo the
    /// position count rather than being rejected, so remote senders always
    /// land on a real position.
    pub fn set(&mut self, requested: u8) -> u8 {
        self.position = requested % WHEEL_POSITIONS as u8;
        self.position
    }

    pub fn position(&self) -> u8 {
        self.position
    }

    /// Servo angle for the current position.
    pub fn angle(&self) -> u8 {
        self.angles[self.position as usize]
    }

    /// Back to position 0 (full-reset command).
    pub fn reset(&mut self) {
        self.position = 0;
    }
}
