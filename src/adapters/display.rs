//! Console display adapter.
//!
//! Implements [`DisplayPort`] by mirroring the kit's three OLED lines to
//! the serial console.  The physical OLED rendering path is an external
//! collaborator; this adapter keeps the display cadence and content
//! observable without it.

use log::info;

use crate::app::ports::DisplayPort;

pub struct ConsoleDisplay;

impl ConsoleDisplay {
    pub fn new() -> Self {
        Self
    }
}

impl DisplayPort for ConsoleDisplay {
    fn render(&mut self, lines: &[&str]) {
        for (i, line) in lines.iter().enumerate() {
            info!("OLED[{}] {}", i + 1, line);
        }
    }
}
