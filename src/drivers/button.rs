//! User push-button driver.
//!
//! The button is wired active-low with the internal pull-up, so a raw
//! GPIO level of `false` means "held down".  The domain core does the
//! release-edge detection; this driver just reports the level.

use crate::drivers::hw_init;
use crate::pins;

pub struct ButtonDriver;

impl ButtonDriver {
    pub fn new() -> Self {
        Self
    }

    /// Current level, `true` while the button is held down.
    pub fn is_pressed(&self) -> bool {
        !hw_init::gpio_read(pins::BUTTON_GPIO)
    }
}
