//! HC-SR04 ultrasonic ranging driver.
//!
//! Fires a 10 µs trigger pulse and measures the echo pulse width with the
//! monotonic microsecond timer.  The measurement busy-waits for at most
//! [`pins::ECHO_TIMEOUT_US`] (~30 ms), which bounds the control loop's
//! worst-case ranging cost.

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

/// Trigger one ranging cycle and return the echo pulse width in µs.
/// Returns `0` when no echo arrives before the timeout.
#[cfg(target_os = "espidf")]
pub fn measure_echo_us() -> u32 {
    // Standard HC-SR04 trigger: a clean low, then 10 µs high.
    hw_init::gpio_write(pins::TRIG_GPIO, false);
    hw_init::delay_us(2);
    hw_init::gpio_write(pins::TRIG_GPIO, true);
    hw_init::delay_us(10);
    hw_init::gpio_write(pins::TRIG_GPIO, false);

    let timeout = u64::from(pins::ECHO_TIMEOUT_US);
    let start = hw_init::uptime_us();

    // Wait for the echo line to go high (pulse start).
    loop {
        if hw_init::gpio_read(pins::ECHO_GPIO) {
            break;
        }
        if hw_init::uptime_us().saturating_sub(start) > timeout {
            return 0;
        }
    }

    let pulse_start = hw_init::uptime_us();
    // Wait for the line to drop (pulse end).
    loop {
        if !hw_init::gpio_read(pins::ECHO_GPIO) {
            break;
        }
        if hw_init::uptime_us().saturating_sub(pulse_start) > timeout {
            return 0;
        }
    }

    (hw_init::uptime_us().saturating_sub(pulse_start)) as u32
}

/// Simulation stub: the stub GPIO level never produces a pulse edge, so
/// ranging reports "no echo" instead of spinning on the fake timer.
#[cfg(not(target_os = "espidf"))]
pub fn measure_echo_us() -> u32 {
    0
}
